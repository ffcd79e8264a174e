// Engine that runs nothing and remembers everything, for testing candidates
// without a device.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use iclblas_base::{
    Access, Buffer, Completion, Dispatcher, Engine, EngineError, Event, HostRegion, Kernel, KernelArg, KernelOptions,
    NdRange, Registry,
};
use num_complex::Complex32;
use once_cell::sync::Lazy;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed for generated operands, `ICLBLAS_TEST_SEED` or 43.
pub static ICLBLAS_TEST_SEED: Lazy<u64> = Lazy::new(|| {
    let x = std::env::var("ICLBLAS_TEST_SEED").unwrap_or_else(|_| "43".to_string());
    x.parse::<u64>().unwrap_or(43)
});

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub kernel: String,
    pub module: String,
    pub args: BTreeMap<u32, KernelArg>,
    pub options: Option<KernelOptions>,
    pub deps: Vec<u64>,
    pub event: u64,
}

impl Submission {
    /// Arguments in position order.
    pub fn args(&self) -> Vec<KernelArg> {
        self.args.values().cloned().collect()
    }

    pub fn arg(&self, index: u32) -> Option<&KernelArg> {
        self.args.get(&index)
    }

    pub fn global(&self) -> Option<NdRange> {
        self.options.map(|o| o.global)
    }

    pub fn local(&self) -> Option<NdRange> {
        self.options.and_then(|o| o.local)
    }

    pub fn buffer_arg(&self, index: u32) -> Option<&Buffer> {
        match self.args.get(&index) {
            Some(KernelArg::Buffer(b)) => Some(b),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub buffer: Buffer,
    pub host: usize,
}

#[derive(Debug, Default)]
struct Failures {
    kernels: HashSet<String>,
    submits: HashSet<String>,
    alloc_above: Option<usize>,
    wait: bool,
}

#[derive(Debug, Default)]
struct State {
    submissions: Vec<Submission>,
    bindings: Vec<Binding>,
    temps: Vec<Buffer>,
    raised: Vec<u64>,
    finished: usize,
    deps: HashMap<u64, Vec<u64>>,
    fail: Failures,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: AtomicU64,
    state: Mutex<State>,
}

impl Inner {
    fn id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn new_event(self: &Arc<Self>, deps: &[Event]) -> Event {
        let id = self.id();
        let dep_ids: Vec<u64> = deps.iter().map(|e| e.id()).collect();
        self.state().deps.insert(id, dep_ids);
        Event::new(RecordedEvent { id, inner: self.clone() })
    }
}

#[derive(Debug)]
pub struct RecordedEvent {
    id: u64,
    inner: Arc<Inner>,
}

impl Completion for RecordedEvent {
    fn id(&self) -> u64 {
        self.id
    }

    fn wait(&self) -> Result<Duration, EngineError> {
        if self.inner.state().fail.wait {
            return Err(EngineError::WaitFailed { event: self.id, reason: "injected".to_string() });
        }
        Ok(Duration::ZERO)
    }
}

/// Mock engine, every call is recorded and can be made to fail.
#[derive(Clone, Debug, Default)]
pub struct RecordingEngine {
    inner: Arc<Inner>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        RecordingEngine::default()
    }

    pub fn fail_kernel(&self, kernel: &str) -> &Self {
        self.inner.state().fail.kernels.insert(kernel.to_string());
        self
    }

    pub fn fail_submit(&self, kernel: &str) -> &Self {
        self.inner.state().fail.submits.insert(kernel.to_string());
        self
    }

    pub fn fail_alloc_above(&self, bytes: usize) -> &Self {
        self.inner.state().fail.alloc_above = Some(bytes);
        self
    }

    pub fn fail_wait(&self) -> &Self {
        self.inner.state().fail.wait = true;
        self
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.inner.state().submissions.clone()
    }

    pub fn last(&self) -> Option<Submission> {
        self.inner.state().submissions.last().cloned()
    }

    pub fn kernels(&self) -> Vec<String> {
        self.inner.state().submissions.iter().map(|s| s.kernel.clone()).collect()
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.inner.state().bindings.clone()
    }

    pub fn temps(&self) -> Vec<Buffer> {
        self.inner.state().temps.clone()
    }

    /// Events made by `raise_event`, no kernel behind them.
    pub fn raised(&self) -> Vec<u64> {
        self.inner.state().raised.clone()
    }

    /// How often `finish` was called.
    pub fn finish_count(&self) -> usize {
        self.inner.state().finished
    }

    pub fn deps_of(&self, event: u64) -> Vec<u64> {
        self.inner.state().deps.get(&event).cloned().unwrap_or_default()
    }

    /// True if `event` waits on `ancestor`, directly or through other events.
    pub fn depends_on(&self, event: u64, ancestor: u64) -> bool {
        let state = self.inner.state();
        let mut stack = vec![event];
        let mut seen = HashSet::new();
        while let Some(e) = stack.pop() {
            if !seen.insert(e) {
                continue;
            }
            if let Some(deps) = state.deps.get(&e) {
                if deps.contains(&ancestor) {
                    return true;
                }
                stack.extend(deps.iter().copied());
            }
        }
        false
    }

    /// Event with no dependencies, handy as a caller supplied dependency.
    pub fn ready_event(&self) -> Event {
        self.inner.new_event(&[])
    }

    pub fn clear(&self) {
        let mut state = self.inner.state();
        state.submissions.clear();
        state.bindings.clear();
        state.temps.clear();
        state.raised.clear();
    }
}

pub struct RecordingKernel {
    kernel: String,
    module: String,
    args: BTreeMap<u32, KernelArg>,
    options: Option<KernelOptions>,
    inner: Arc<Inner>,
}

impl Kernel for RecordingKernel {
    fn set_arg(&mut self, index: u32, arg: KernelArg) -> Result<(), EngineError> {
        self.args.insert(index, arg);
        Ok(())
    }

    fn set_options(&mut self, options: KernelOptions) -> Result<(), EngineError> {
        self.options = Some(options);
        Ok(())
    }

    fn submit(&mut self, deps: &[Event]) -> Result<Event, EngineError> {
        if self.inner.state().fail.submits.contains(&self.kernel) {
            return Err(EngineError::SubmissionFailed { kernel: self.kernel.clone(), reason: "injected".to_string() });
        }
        let ev = self.inner.new_event(deps);
        let submission = Submission {
            kernel: self.kernel.clone(),
            module: self.module.clone(),
            args: self.args.clone(),
            options: self.options,
            deps: deps.iter().map(|e| e.id()).collect(),
            event: ev.id(),
        };
        self.inner.state().submissions.push(submission);
        Ok(ev)
    }
}

impl Engine for RecordingEngine {
    fn get_kernel(&self, kernel: &str, module: &str) -> Result<Box<dyn Kernel>, EngineError> {
        if self.inner.state().fail.kernels.contains(kernel) {
            return Err(EngineError::KernelNotFound { kernel: kernel.to_string(), module: module.to_string() });
        }
        Ok(Box::new(RecordingKernel {
            kernel: kernel.to_string(),
            module: module.to_string(),
            args: BTreeMap::new(),
            options: None,
            inner: self.inner.clone(),
        }))
    }

    fn bind_host(&self, region: HostRegion, access: Access) -> Result<Buffer, EngineError> {
        let buffer = Buffer::new(self.inner.id(), access, region.bytes());
        self.inner.state().bindings.push(Binding { buffer: buffer.clone(), host: region.as_ptr() as usize });
        Ok(buffer)
    }

    fn create_temp(&self, bytes: usize) -> Result<Buffer, EngineError> {
        let mut state = self.inner.state();
        if let Some(limit) = state.fail.alloc_above {
            if bytes > limit {
                return Err(EngineError::AllocationFailed { bytes });
            }
        }
        let buffer = Buffer::new(self.inner.id(), Access::Temp, bytes);
        state.temps.push(buffer.clone());
        Ok(buffer)
    }

    fn raise_event(&self, deps: &[Event]) -> Result<Event, EngineError> {
        let ev = self.inner.new_event(deps);
        self.inner.state().raised.push(ev.id());
        Ok(ev)
    }

    fn finish(&self) -> Result<(), EngineError> {
        self.inner.state().finished += 1;
        Ok(())
    }
}

/// Dispatcher over a recording engine, `register` fills the registry.
pub fn dispatcher_with(engine: &RecordingEngine, register: impl FnOnce(&mut Registry)) -> Dispatcher {
    let mut registry = Registry::new();
    register(&mut registry);
    Dispatcher::new(Arc::new(registry), Arc::new(engine.clone()))
}

pub trait RandomElem: Copy {
    fn sample(dist: &Uniform<f32>, rng: &mut StdRng) -> Self;
}

impl RandomElem for f32 {
    fn sample(dist: &Uniform<f32>, rng: &mut StdRng) -> Self {
        dist.sample(rng)
    }
}

impl RandomElem for Complex32 {
    fn sample(dist: &Uniform<f32>, rng: &mut StdRng) -> Self {
        let x = dist.sample(rng);
        let y = dist.sample(rng);
        Complex32::new(x, y)
    }
}

pub fn random_matrix_uniform<T: RandomElem>(arr: &mut [T]) {
    let mut x = StdRng::seed_from_u64(*ICLBLAS_TEST_SEED);
    let un_dist = Uniform::new(-1.0f32, 1.0f32);
    arr.iter_mut().for_each(|p| *p = T::sample(&un_dist, &mut x));
}

pub fn random_vec<T: RandomElem + Default>(len: usize) -> Vec<T> {
    let mut v = vec![T::default(); len];
    random_matrix_uniform(&mut v);
    v
}

/// Vector lengths around the thresholds candidates switch on.
pub fn generate_n_dims() -> Vec<i32> {
    vec![1, 15, 16, 17, 31, 32, 63, 64, 127, 128, 255, 256, 1000, 65535, 65536, 70000]
}

pub fn generate_inc() -> Vec<i32> {
    vec![1, 2, 3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use iclblas_base::{Error, Launch};

    #[test]
    fn records_submission() {
        let engine = RecordingEngine::new();
        let dep = engine.ready_event();
        let buf = engine.create_temp(64).unwrap();
        let mut k = Launch::new(&engine, "k", "m").unwrap();
        k.bind([KernelArg::Int(3), KernelArg::Buffer(buf.clone())]).unwrap();
        k.geometry(NdRange::d1(16), Some(NdRange::d1(16))).unwrap();
        let ev = k.submit(&[dep.clone()]).unwrap();
        let s = engine.last().unwrap();
        assert_eq!(s.kernel, "k");
        assert_eq!(s.args(), vec![KernelArg::Int(3), KernelArg::Buffer(buf)]);
        assert_eq!(s.deps, vec![dep.id()]);
        assert_eq!(s.event, ev.id());
        assert!(engine.depends_on(ev.id(), dep.id()));
        assert!(!engine.depends_on(dep.id(), ev.id()));
    }

    #[test]
    fn injected_failures() {
        let engine = RecordingEngine::new();
        engine.fail_kernel("missing").fail_alloc_above(8);
        assert!(matches!(engine.get_kernel("missing", "m"), Err(EngineError::KernelNotFound { .. })));
        assert_eq!(engine.create_temp(16).unwrap_err(), EngineError::AllocationFailed { bytes: 16 });
        assert!(engine.create_temp(8).is_ok());
    }

    #[test]
    fn injected_submit_failure_records_nothing() {
        let engine = RecordingEngine::new();
        engine.fail_submit("second");
        Launch::new(&engine, "first", "m").unwrap().submit(&[]).unwrap();
        let err = Launch::new(&engine, "second", "m").unwrap().submit(&[]).unwrap_err();
        assert_eq!(err, Error::Engine(EngineError::SubmissionFailed { kernel: "second".into(), reason: "injected".into() }));
        assert_eq!(engine.kernels(), vec!["first"]);
        engine.finish().unwrap();
        assert_eq!(engine.finish_count(), 1);
    }

    #[test]
    fn seeded_data_is_reproducible() {
        let a: Vec<f32> = random_vec(32);
        let b: Vec<f32> = random_vec(32);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0f32..1.0f32).contains(v)));
    }
}
