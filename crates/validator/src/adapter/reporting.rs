//! Reporting layer: forwards every call, then tells the reporter
//!
//! Leaves are reported after they ran; aggregations open a frame before
//! their children run and close it with their own status. The reporter is
//! never borrowed while the rest of the chain runs.

use std::cell::RefCell;

use crate::adapter::{Call, Layer, Next};
use crate::foundation::Status;
use crate::report::{FrameKind, Reporter};

pub struct ReportingLayer<'r, 'l> {
    reporter: &'r RefCell<Reporter<'l>>,
}

impl<'r, 'l> ReportingLayer<'r, 'l> {
    pub fn new(reporter: &'r RefCell<Reporter<'l>>) -> Self {
        Self { reporter }
    }

    fn frame(&self, kind: FrameKind, call: &Call<'_>, next: Next<'_>) -> Status {
        self.reporter.borrow_mut().open(kind);
        let status = next.run(call);
        self.reporter.borrow_mut().close(status);
        status
    }
}

impl Layer for ReportingLayer<'_, '_> {
    fn name(&self) -> &str {
        "reporting"
    }

    fn handle(&self, call: &Call<'_>, next: Next<'_>) -> Status {
        match *call {
            Call::Exists {
                member,
                property,
                expected,
            } => {
                let status = next.run(call);
                self.reporter
                    .borrow_mut()
                    .exists(status, member, property, expected);
                status
            }
            Call::And { .. } => self.frame(FrameKind::And, call, next),
            Call::Or { .. } => self.frame(FrameKind::Or, call, next),
            Call::Not { .. } => self.frame(FrameKind::Not, call, next),
            Call::Any(_) => self.frame(FrameKind::Any, call, next),
            Call::All(_) => self.frame(FrameKind::All, call, next),
            Call::Explained { message, .. } => {
                self.frame(FrameKind::Explained(message.to_owned()), call, next)
            }
            Call::Operator(check)
            | Call::Property(check)
            | Call::Validate(check)
            | Call::OtherMember(check)
            | Call::MasterSample(check) => {
                let status = next.run(call);
                self.reporter.borrow_mut().condition(status, &check);
                status
            }
        }
    }
}
