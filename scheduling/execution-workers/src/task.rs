/// A unit of work dispatched to the execution workers.
///
/// Tasks are boxed closures so a submitter can capture whatever context the work needs; the
/// pool has no knowledge of what runs and provides no return channel.
pub type Task = Box<dyn FnOnce() + Send + 'static>;
