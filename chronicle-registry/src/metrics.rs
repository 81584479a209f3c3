use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

/// Registry-wide Prometheus metrics.
pub struct RegistryMetrics {
    pub established: Counter,
    pub modified: Counter,
    pub delegated: Counter,
    pub terminated: Counter,
    pub deadlines_configured: Counter,
    pub priorities_set: Counter,
    /// Operations that ended in NotFound, AlreadyExists or InvalidInput.
    pub rejected: Counter,
    /// Chronicles currently stored.
    pub active: Gauge,
    pub registry: Registry,
}

impl RegistryMetrics {
    /// Create a new metrics registry with all registry metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let established = Counter::default();
        let modified = Counter::default();
        let delegated = Counter::default();
        let terminated = Counter::default();
        let deadlines_configured = Counter::default();
        let priorities_set = Counter::default();
        let rejected = Counter::default();
        let active = Gauge::default();

        registry.register(
            "chronicle_established",
            "Chronicles created by their owner",
            established.clone(),
        );
        registry.register(
            "chronicle_modified",
            "Chronicle updates",
            modified.clone(),
        );
        registry.register(
            "chronicle_delegated",
            "Chronicles created on behalf of another participant",
            delegated.clone(),
        );
        registry.register(
            "chronicle_terminated",
            "Chronicles removed together with their priority and deadline",
            terminated.clone(),
        );
        registry.register(
            "chronicle_deadline_configured",
            "Deadline constraints written",
            deadlines_configured.clone(),
        );
        registry.register(
            "chronicle_priority_set",
            "Priority classifications written",
            priorities_set.clone(),
        );
        registry.register(
            "chronicle_rejected",
            "Operations rejected with a domain error",
            rejected.clone(),
        );
        registry.register(
            "chronicle_active",
            "Chronicles currently stored",
            active.clone(),
        );

        Self {
            established,
            modified,
            delegated,
            terminated,
            deadlines_configured,
            priorities_set,
            rejected,
            active,
            registry,
        }
    }

    /// Count a successful operation by its action name.
    pub fn observe_success(&self, action: &str) {
        match action {
            "establish" => {
                self.established.inc();
                self.active.inc();
            }
            "delegate" => {
                self.delegated.inc();
                self.active.inc();
            }
            "terminate" => {
                self.terminated.inc();
                self.active.dec();
            }
            "modify" => {
                self.modified.inc();
            }
            "configure_deadline" => {
                self.deadlines_configured.inc();
            }
            "set_priority" => {
                self.priorities_set.inc();
            }
            _ => {}
        }
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();
        prometheus_client::encoding::text::encode(&mut buf, &self.registry)?;
        Ok(buf)
    }
}

impl Default for RegistryMetrics {
    fn default() -> Self {
        Self::new()
    }
}
