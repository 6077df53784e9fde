use metrics::{describe_counter, describe_gauge, gauge};

pub fn component_info_metric(name: &'static str) {
    static NAME: &str = "probescope_component_info";

    describe_gauge!(NAME, "Basic information about the component");

    let version = env!("CARGO_PKG_VERSION");
    gauge!(NAME, "component" => name, "version" => version).set(1);
}

/// Registers the descriptions of every counter emitted by the engine.
pub fn describe_counters() {
    describe_counter!(
        names::RECOMPUTES,
        metrics::Unit::Count,
        "Number of full recompute sweeps"
    );
    describe_counter!(
        names::PROBE_HITS,
        metrics::Unit::Count,
        "Number of probe crossings binned into a collector"
    );
    describe_counter!(
        names::FAILURES,
        metrics::Unit::Count,
        "Number of failures encountered"
    );
}

pub mod names {
    pub const RECOMPUTES: &str = "probescope_recomputes";
    pub const PROBE_HITS: &str = "probescope_probe_hits";
    pub const FAILURES: &str = "probescope_failures";
    pub const SCENE_VERSION: &str = "probescope_scene_version";
}

pub mod failures {
    #[derive(Debug, Clone, Eq, Hash, PartialEq)]
    pub enum FailureKind {
        SceneFileUnreadable,
        SceneInvalid,
        ReportWriteFailed,
    }

    // Label building function
    pub fn get_label(failure_kind: FailureKind) -> (&'static str, &'static str) {
        (
            "failure_kind",
            match failure_kind {
                FailureKind::SceneFileUnreadable => "scene_file_unreadable",
                FailureKind::SceneInvalid => "scene_invalid",
                FailureKind::ReportWriteFailed => "report_write_failed",
            },
        )
    }
}
