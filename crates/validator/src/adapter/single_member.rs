//! Re-checking one member in isolation
//!
//! Every leaf whose member does not match the configured pattern succeeds
//! without being evaluated, so only the rules about that member can fail.
//! Markers in the pattern match any key; a pattern matches every member
//! below it (`field1` covers `field1.size`).

use crate::adapter::{Call, Layer, Next};
use crate::foundation::Status;
use crate::path::{Key, Member, Path};
use crate::property::Property;

#[derive(Debug, Clone)]
pub struct SingleMemberLayer {
    pattern: Path,
}

impl SingleMemberLayer {
    #[must_use]
    pub fn new(member: &Member) -> Self {
        Self {
            pattern: member.path().clone(),
        }
    }

    fn covers(&self, member: &Member, property: Option<&Property>) -> bool {
        let keys = member.path().keys();
        if self.pattern.matches_prefix_of(keys) {
            return true;
        }
        // `member("a").size()` as pattern names the property leaf of `a`.
        property.is_some_and(|property| {
            let mut full: Vec<Key> = keys.to_vec();
            full.push(Key::Property(property.clone()));
            self.pattern.matches_prefix_of(&full)
        })
    }
}

impl Layer for SingleMemberLayer {
    fn name(&self) -> &str {
        "single_member"
    }

    fn handle(&self, call: &Call<'_>, next: Next<'_>) -> Status {
        let covered = match call {
            Call::Exists {
                member, property, ..
            } => self.covers(member, *property),
            _ => match call.check() {
                Some(check) => self.covers(check.member, check.property),
                None => true,
            },
        };
        if covered {
            next.run(call)
        } else {
            Status::Success
        }
    }
}
