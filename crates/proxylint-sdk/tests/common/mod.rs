//! Common test utilities for SDK integration tests

use proxylint_sdk::{ConditionSite, SourcePosition};

/// Test helper that lays out condition sites the way a proxy endpoint file
/// would: one scope per element group, six lines per element.
pub struct TestBundle {
    sites: Vec<ConditionSite>,
    next_line: usize,
}

impl TestBundle {
    pub fn new() -> Self {
        Self {
            sites: Vec::new(),
            next_line: 1,
        }
    }

    /// Add a conditional flow of the default proxy endpoint
    pub fn with_flow(self, name: &str, condition: &str) -> Self {
        self.with_site("proxies/default.xml#Flows", &format!("Flow.{}", name), condition)
    }

    /// Add a fault rule of the default target endpoint
    pub fn with_fault_rule(self, name: &str, condition: &str) -> Self {
        self.with_site(
            "targets/default.xml#FaultRules",
            &format!("FaultRule.{}", name),
            condition,
        )
    }

    /// Add a route rule of the default proxy endpoint
    pub fn with_route_rule(self, name: &str, condition: &str) -> Self {
        self.with_site(
            "proxies/default.xml#RouteRules",
            &format!("RouteRule.{}", name),
            condition,
        )
    }

    fn with_site(mut self, scope: &str, owner: &str, condition: &str) -> Self {
        let position = SourcePosition::new(self.next_line, 13);
        self.sites
            .push(ConditionSite::new(scope, owner, condition, position));
        self.next_line += 6;
        self
    }

    pub fn sites(&self) -> &[ConditionSite] {
        &self.sites
    }
}
