use crate::VmInterface;

/// Configuration for a [`Scheduler`](crate::Scheduler).
///
/// # Example
///
/// ```ignore
/// let config = ExecutionConfig::default()
///     .with_vm(vm)
///     .with_worker_count(8)
///     .with_trust_dag(false);
/// ```
pub struct ExecutionConfig<V: VmInterface> {
    worker_count: usize,
    trust_dag: bool,
    vm: Option<V>,
}

impl<V: VmInterface> ExecutionConfig<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the VM instance driven by the scheduler. Required.
    pub fn with_vm(mut self, vm: V) -> Self {
        self.vm = Some(vm);
        self
    }

    /// Sets the worker thread count (default: host CPU count).
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Enables or disables the trusting confirmation fast path (default: enabled).
    ///
    /// Disable when the DAG's accuracy is unknown; confirmation then re-walks the dense
    /// position array instead of trusting the level structure.
    pub fn with_trust_dag(mut self, trust: bool) -> Self {
        self.trust_dag = trust;
        self
    }

    pub(crate) fn unpack(self) -> (usize, bool, V) {
        (self.worker_count, self.trust_dag, self.vm.expect("execution config has no VM"))
    }
}

impl<V: VmInterface> Default for ExecutionConfig<V> {
    fn default() -> Self {
        Self { worker_count: num_cpus::get(), trust_dag: true, vm: None }
    }
}
