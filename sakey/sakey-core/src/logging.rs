use std::fmt::Debug;
use std::path::Path;

use tracing::{info, warn};

use crate::loader::SUCCESS_MESSAGE;

pub trait IStageReporter: Debug {
    /// Called with the optional variables that were unset. They are still
    /// written, as `null`.
    fn report_missing(&self, variables: &[&str]);
    fn report_written(&self, path: &Path);
    fn report_success(&self);
}

/// Diagnostics go to `tracing`; the success line goes to stdout.
#[derive(Debug, Default)]
pub struct ConsoleStageReporter;

impl IStageReporter for ConsoleStageReporter {
    fn report_missing(&self, variables: &[&str]) {
        warn!(
            missing = %variables.join(", "),
            "optional service account variables are unset; writing null"
        );
    }

    fn report_written(&self, path: &Path) {
        info!(path = %path.display(), "service account file written");
    }

    fn report_success(&self) {
        println!("{}", SUCCESS_MESSAGE);
    }
}
