//! Operation tables and typed handles for the four YARN REST roles.
//!
//! Each submodule declares its `OPERATIONS` table and a handle struct whose
//! methods forward to `ApiClient::call` with the matching descriptor.

pub mod application_master;
pub mod history_server;
pub mod node_manager;
pub mod resource_manager;

pub use application_master::ApplicationMaster;
pub use history_server::{HistoryServer, JobsQuery};
pub use node_manager::{NodeApplicationsQuery, NodeManager};
pub use resource_manager::{ApplicationsQuery, NodesQuery, ResourceManager};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::client::ApiRole;
    use crate::operation::ParamLocation;

    #[test]
    fn placeholders_match_path_params() {
        for role in ApiRole::ALL {
            for op in role.operations() {
                let placeholders: Vec<_> = op.placeholders().collect();
                let declared: Vec<_> = op.path_params().map(|p| p.name).collect();
                assert_eq!(placeholders, declared, "{role}::{}", op.name);
            }
        }
    }

    #[test]
    fn operation_names_unique_per_role() {
        for role in ApiRole::ALL {
            let mut seen = HashSet::new();
            for op in role.operations() {
                assert!(seen.insert(op.name), "{role}: duplicate {}", op.name);
            }
        }
    }

    #[test]
    fn parameter_names_unique_per_operation() {
        for role in ApiRole::ALL {
            for op in role.operations() {
                let mut seen = HashSet::new();
                for param in op.params {
                    assert!(seen.insert(param.name), "{role}::{}: {}", op.name, param.name);
                }
            }
        }
    }

    #[test]
    fn path_params_are_unconstrained() {
        for role in ApiRole::ALL {
            for op in role.operations() {
                for param in op.params.iter().filter(|p| p.location == ParamLocation::Path) {
                    assert!(param.vocabulary.is_none(), "{role}::{}", op.name);
                }
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        let op = ApiRole::NodeManager.operation("node_container").unwrap();
        assert_eq!(op.path, "/containers/{container_id}");
        assert!(ApiRole::HistoryServer.operation("cluster_nodes").is_none());
    }
}
