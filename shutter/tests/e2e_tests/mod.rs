pub mod test_host_leaves;
pub mod test_rejected_joins;
