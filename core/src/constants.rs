//! Closed vocabularies for YARN state and status fields.
//!
//! Each vocabulary is declared once and yields two things:
//! - a Rust enum for typed callers (`YarnApplicationState::Running`), mapping
//!   to and from its wire string through `as_str`, `FromStr`, and serde;
//! - a `Vocabulary` static that operation descriptors reference to validate
//!   caller-supplied strings at runtime.
//!
//! Response payloads keep state fields as plain strings; these enums are only
//! consulted when a caller asks for a typed view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::YarnError;

/// A named, closed set of valid wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl Vocabulary {
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    /// Reject `value` unless it is a member, naming `parameter` in the error.
    pub fn validate(&self, parameter: &str, value: &str) -> Result<(), YarnError> {
        if self.contains(value) {
            return Ok(());
        }
        Err(self.rejection(parameter, value))
    }

    fn rejection(&self, parameter: &str, value: &str) -> YarnError {
        YarnError::validation(
            parameter,
            format!("`{value}` is not one of {}", self.values.join(", ")),
        )
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $vocab:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        pub static $vocab: Vocabulary = Vocabulary {
            name: stringify!($name),
            values: &[$($wire),+],
        };

        impl FromStr for $name {
            type Err = YarnError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($vocab.rejection(stringify!($name), other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }
    };
}

vocabulary! {
    /// Application lifecycle as reported by the ResourceManager.
    YarnApplicationState, YARN_APPLICATION_STATE {
        New => "NEW",
        NewSaving => "NEW_SAVING",
        Submitted => "SUBMITTED",
        Accepted => "ACCEPTED",
        Running => "RUNNING",
        Finished => "FINISHED",
        Failed => "FAILED",
        Killed => "KILLED",
    }
}

vocabulary! {
    /// Outcome an application reported on completion.
    FinalApplicationStatus, FINAL_APPLICATION_STATUS {
        Undefined => "UNDEFINED",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
        Killed => "KILLED",
    }
}

vocabulary! {
    /// Application state as seen by a single NodeManager.
    ApplicationState, APPLICATION_STATE {
        New => "NEW",
        Initing => "INITING",
        Running => "RUNNING",
        FinishingContainersWait => "FINISHING_CONTAINERS_WAIT",
        ApplicationResourcesCleaningUp => "APPLICATION_RESOURCES_CLEANINGUP",
        Finished => "FINISHED",
    }
}

vocabulary! {
    ContainerState, CONTAINER_STATE {
        New => "NEW",
        Localizing => "LOCALIZING",
        LocalizationFailed => "LOCALIZATION_FAILED",
        Localized => "LOCALIZED",
        Running => "RUNNING",
        ExitedWithSuccess => "EXITED_WITH_SUCCESS",
        ExitedWithFailure => "EXITED_WITH_FAILURE",
        Killing => "KILLING",
        CleanedUpAfterKill => "CONTAINER_CLEANEDUP_AFTER_KILL",
        ResourcesCleaningUp => "CONTAINER_RESOURCES_CLEANINGUP",
        Done => "DONE",
    }
}

vocabulary! {
    NodeState, NODE_STATE {
        New => "NEW",
        Running => "RUNNING",
        Unhealthy => "UNHEALTHY",
        Decommissioning => "DECOMMISSIONING",
        Decommissioned => "DECOMMISSIONED",
        Lost => "LOST",
        Rebooted => "REBOOTED",
        Shutdown => "SHUTDOWN",
    }
}

vocabulary! {
    /// MapReduce job state, shared by the ApplicationMaster and HistoryServer.
    JobState, JOB_STATE {
        New => "NEW",
        Inited => "INITED",
        Running => "RUNNING",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
        KillWait => "KILL_WAIT",
        Killed => "KILLED",
        Error => "ERROR",
    }
}

vocabulary! {
    TaskType, TASK_TYPE {
        Map => "m",
        Reduce => "r",
    }
}

vocabulary! {
    /// Wire form of the `healthy` node filter.
    Healthy, HEALTHY {
        True => "true",
        False => "false",
    }
}

impl From<bool> for Healthy {
    fn from(value: bool) -> Self {
        if value {
            Healthy::True
        } else {
            Healthy::False
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_and_vocabulary_agree() {
        let wire: Vec<&str> = YarnApplicationState::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(wire, YARN_APPLICATION_STATE.values);

        let wire: Vec<&str> = ContainerState::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(wire, CONTAINER_STATE.values);
    }

    #[test]
    fn parse_known_value() {
        let state: YarnApplicationState = "RUNNING".parse().unwrap();
        assert_eq!(state, YarnApplicationState::Running);
        assert_eq!(state.to_string(), "RUNNING");

        let task: TaskType = "r".parse().unwrap();
        assert_eq!(task, TaskType::Reduce);
    }

    #[test]
    fn parse_unknown_value_is_validation_error() {
        let err = "running".parse::<YarnApplicationState>().unwrap_err();
        match err {
            YarnError::Validation { parameter, message } => {
                assert_eq!(parameter, "YarnApplicationState");
                assert!(message.contains("`running`"), "{message}");
                assert!(message.contains("NEW_SAVING"), "{message}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn vocabulary_validate_names_parameter() {
        assert!(NODE_STATE.validate("state", "LOST").is_ok());
        let err = NODE_STATE.validate("state", "GONE").unwrap_err();
        assert!(matches!(err, YarnError::Validation { ref parameter, .. } if parameter == "state"));
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&FinalApplicationStatus::Succeeded).unwrap();
        assert_eq!(json, r#""SUCCEEDED""#);
        let back: ApplicationState = serde_json::from_str(r#""APPLICATION_RESOURCES_CLEANINGUP""#).unwrap();
        assert_eq!(back, ApplicationState::ApplicationResourcesCleaningUp);
    }

    #[test]
    fn healthy_from_bool() {
        assert_eq!(Healthy::from(true).as_str(), "true");
        assert_eq!(Healthy::from(false).as_str(), "false");
    }
}
