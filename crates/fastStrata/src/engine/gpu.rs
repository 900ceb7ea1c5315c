//! GPU-accelerated backend for vectorized searches.
//!
//! ## Purpose
//!
//! This module provides the implementation registered for `Accelerator`
//! handles. It runs vectorized lower bound, upper bound and membership queries
//! as one `wgpu` compute dispatch with one invocation per query.
//!
//! ## Design notes
//!
//! * **Codes, not values**: The device only sees `u32` order-preserving codes
//!   produced by the same codec the radix sort uses, so the kernel is a plain
//!   unsigned binary search. A type qualifies when its key and comparator admit
//!   a codec no wider than four bytes.
//! * **Host fallback**: Every other operation, type or comparator runs the
//!   sequential reference algorithm on the host.
//! * **Persistent executor**: Device, pipeline and buffers live in a
//!   thread-local executor and are grown on demand.
//!
//! ## Invariants
//!
//! * Device results equal the reference results, since equal codes mean
//!   equivalent elements.
//! * Empty inputs never reach the device.
//!
//! ## Non-goals
//!
//! * This module does not sort on the device.

// External dependencies
use bytemuck::{Pod, Zeroable};
use core::cell::RefCell;
use core::mem::size_of;
use pollster::block_on;
use tracing::debug;
use wgpu::{
    BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, Buffer, BufferBindingType, BufferDescriptor, BufferUsages,
    CommandEncoderDescriptor, ComputePassDescriptor, ComputePipeline, ComputePipelineDescriptor,
    Device, Instance, InstanceDescriptor, MapMode, PipelineLayoutDescriptor, PollType, Queue,
    RequestAdapterOptions, ShaderModuleDescriptor, ShaderSource, ShaderStages,
};

// Export dependencies from strata crate
use strata::internals::algorithms::radix::RadixCodec;
use strata::internals::algorithms::search;
use strata::internals::engine::dispatch::Backend;
use strata::internals::engine::specialize::radix_codec;
use strata::internals::primitives::compare::Compare;
use strata::internals::primitives::errors::StrataError;

// -----------------------------------------------------------------------------
// Shader Source (WGSL)
// -----------------------------------------------------------------------------
const SHADER_SOURCE: &str = r#"
struct Params {
    n: u32,
    queries: u32,
    mode: u32,      // 0 = lower bound, 1 = upper bound, 2 = membership
    row_width: u32, // invocations per dispatch row
}

@group(0) @binding(0) var<uniform> params: Params;
@group(0) @binding(1) var<storage, read> sorted: array<u32>;
@group(0) @binding(2) var<storage, read> queries: array<u32>;
@group(0) @binding(3) var<storage, read_write> results: array<u32>;

@compute @workgroup_size(64)
fn search(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let q = global_id.y * params.row_width + global_id.x;
    if (q >= params.queries) {
        return;
    }

    let value = queries[q];
    var lo = 0u;
    var hi = params.n;
    loop {
        if (lo >= hi) {
            break;
        }
        let mid = lo + (hi - lo) / 2u;
        var right: bool;
        if (params.mode == 1u) {
            right = sorted[mid] <= value;
        } else {
            right = sorted[mid] < value;
        }
        if (right) {
            lo = mid + 1u;
        } else {
            hi = mid;
        }
    }

    if (params.mode == 2u) {
        results[q] = select(0u, 1u, lo < params.n && sorted[lo] == value);
    } else {
        results[q] = lo;
    }
}
"#;

/// Invocations per workgroup; must match `@workgroup_size`.
const WORKGROUP_SIZE: u32 = 64;

/// Largest workgroup count per dispatch dimension.
const MAX_WORKGROUPS_PER_DIM: u32 = 65_535;

thread_local! {
    static THREAD_EXECUTOR: RefCell<Option<GpuExecutor>> = const { RefCell::new(None) };
}

/// Query kind evaluated by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SearchMode {
    /// First position not ordered before the query.
    LowerBound = 0,
    /// First position ordered after the query.
    UpperBound = 1,
    /// Whether an equivalent element exists.
    Contains = 2,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct GpuParams {
    n: u32,
    queries: u32,
    mode: u32,
    row_width: u32,
}

// ============================================================================
// Executor
// ============================================================================

/// Device state reused across calls on one thread.
pub struct GpuExecutor {
    device: Device,
    queue: Queue,
    pipeline: ComputePipeline,
    layout: BindGroupLayout,

    params_buffer: Option<Buffer>,
    sorted_buffer: Option<Buffer>,
    queries_buffer: Option<Buffer>,
    results_buffer: Option<Buffer>,
    staging_buffer: Option<Buffer>,
}

impl GpuExecutor {
    /// Acquire an adapter and device and compile the search kernel.
    pub async fn new() -> Result<Self, StrataError> {
        let instance = Instance::new(&InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&RequestAdapterOptions::default())
            .await
            .map_err(|e| StrataError::Device(format!("No GPU adapter found: {e}")))?;

        let (device, queue): (Device, Queue) = adapter
            .request_device(&Default::default())
            .await
            .map_err(|e| StrataError::Device(format!("{e:?}")))?;

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Search Shader"),
            source: ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let storage = |binding: u32, read_only: bool| BindGroupLayoutEntry {
            binding,
            visibility: ShaderStages::COMPUTE,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Search Bindings"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::COMPUTE,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                storage(1, true),
                storage(2, true),
                storage(3, false),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Search Pipeline Layout"),
            bind_group_layouts: &[&layout],
            ..Default::default()
        });

        let pipeline = device.create_compute_pipeline(&ComputePipelineDescriptor {
            label: Some("search"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("search"),
            compilation_options: Default::default(),
            cache: None,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            layout,
            params_buffer: None,
            sorted_buffer: None,
            queries_buffer: None,
            results_buffer: None,
            staging_buffer: None,
        })
    }

    fn ensure_buffer_capacity(
        device: &Device,
        label: &str,
        buffer_opt: &mut Option<Buffer>,
        size_required: u64,
        usage: BufferUsages,
    ) {
        if let Some(buffer) = buffer_opt.as_ref() {
            if buffer.size() < size_required {
                *buffer_opt = None;
            }
        }

        if buffer_opt.is_none() {
            *buffer_opt = Some(device.create_buffer(&BufferDescriptor {
                label: Some(label),
                size: size_required,
                usage,
                mapped_at_creation: false,
            }));
        }
    }

    /// Run one batch of queries over `sorted`; both must be non-empty.
    pub fn run(
        &mut self,
        sorted: &[u32],
        queries: &[u32],
        mode: SearchMode,
    ) -> Result<Vec<u32>, StrataError> {
        let n = u32::try_from(sorted.len())
            .map_err(|_| StrataError::Device("sorted input exceeds u32 range".into()))?;
        let count = u32::try_from(queries.len())
            .map_err(|_| StrataError::Device("query count exceeds u32 range".into()))?;

        let groups = count.div_ceil(WORKGROUP_SIZE);
        let groups_x = groups.min(MAX_WORKGROUPS_PER_DIM);
        let groups_y = groups.div_ceil(groups_x);
        let params = GpuParams {
            n,
            queries: count,
            mode: mode as u32,
            row_width: groups_x * WORKGROUP_SIZE,
        };

        let sorted_bytes = (sorted.len() * size_of::<u32>()) as u64;
        let query_bytes = (queries.len() * size_of::<u32>()) as u64;

        Self::ensure_buffer_capacity(
            &self.device,
            "Params",
            &mut self.params_buffer,
            size_of::<GpuParams>() as u64,
            BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        );
        Self::ensure_buffer_capacity(
            &self.device,
            "Sorted",
            &mut self.sorted_buffer,
            sorted_bytes,
            BufferUsages::STORAGE | BufferUsages::COPY_DST,
        );
        Self::ensure_buffer_capacity(
            &self.device,
            "Queries",
            &mut self.queries_buffer,
            query_bytes,
            BufferUsages::STORAGE | BufferUsages::COPY_DST,
        );
        Self::ensure_buffer_capacity(
            &self.device,
            "Results",
            &mut self.results_buffer,
            query_bytes,
            BufferUsages::STORAGE | BufferUsages::COPY_SRC,
        );
        Self::ensure_buffer_capacity(
            &self.device,
            "Staging",
            &mut self.staging_buffer,
            query_bytes,
            BufferUsages::MAP_READ | BufferUsages::COPY_DST,
        );

        let (
            Some(params_buf),
            Some(sorted_buf),
            Some(queries_buf),
            Some(results_buf),
            Some(staging),
        ) = (
            self.params_buffer.as_ref(),
            self.sorted_buffer.as_ref(),
            self.queries_buffer.as_ref(),
            self.results_buffer.as_ref(),
            self.staging_buffer.as_ref(),
        ) else {
            return Err(StrataError::Device("buffer allocation failed".into()));
        };

        self.queue
            .write_buffer(params_buf, 0, bytemuck::cast_slice(&[params]));
        self.queue
            .write_buffer(sorted_buf, 0, bytemuck::cast_slice(sorted));
        self.queue
            .write_buffer(queries_buf, 0, bytemuck::cast_slice(queries));

        let bind_group = self.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Search Bind Group"),
            layout: &self.layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: params_buf.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: sorted_buf.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: queries_buf.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 3,
                    resource: results_buf.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Search Main"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&ComputePassDescriptor::default());
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups_x, groups_y, 1);
        }
        encoder.copy_buffer_to_buffer(results_buf, 0, staging, 0, query_bytes);
        self.queue.submit(Some(encoder.finish()));

        block_on(self.download(staging, query_bytes))
    }

    async fn download(&self, staging: &Buffer, size: u64) -> Result<Vec<u32>, StrataError> {
        let slice = staging.slice(..size);
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        slice.map_async(MapMode::Read, move |v| {
            let _ = tx.send(v);
        });
        self.device
            .poll(PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| StrataError::Device(format!("{e:?}")))?;

        match rx.receive().await {
            Some(Ok(())) => {
                let data = slice.get_mapped_range();
                let out = bytemuck::cast_slice(&data).to_vec();
                drop(data);
                staging.unmap();
                Ok(out)
            }
            Some(Err(e)) => Err(StrataError::Device(format!("{e:?}"))),
            None => Err(StrataError::Device("readback channel closed".into())),
        }
    }
}

/// Run `f` with this thread's executor, creating it on first use.
fn with_executor<R>(
    f: impl FnOnce(&mut GpuExecutor) -> Result<R, StrataError>,
) -> Result<R, StrataError> {
    THREAD_EXECUTOR.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(block_on(GpuExecutor::new())?);
        }
        match slot.as_mut() {
            Some(exec) => f(exec),
            None => Err(StrataError::Device("GPU executor unavailable".into())),
        }
    })
}

// ============================================================================
// GPU Backend
// ============================================================================

/// Accelerator backend: device searches for small arithmetic keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuBackend;

impl GpuBackend {
    /// Create the backend; the device is acquired on first use.
    pub fn new() -> Self {
        Self
    }
}

/// Codec usable on the device, if `T` under `C` encodes into 32 bits.
fn device_codec<T: 'static, C: 'static>() -> Option<RadixCodec<T>> {
    radix_codec::<T, C>().filter(|codec| codec.bytes() <= size_of::<u32>())
}

/// Run one query kind on the device and hand each raw result to `write`.
fn device_queries<T, C>(
    operation: &'static str,
    src: &[T],
    values: &[T],
    mode: SearchMode,
    write: impl FnMut(usize, u32),
) -> Option<Result<(), StrataError>>
where
    T: 'static,
    C: 'static,
{
    if src.is_empty() || values.is_empty() {
        return None;
    }
    let Some(codec) = device_codec::<T, C>() else {
        debug!(operation, "type not representable on device, using host");
        return None;
    };

    let encode = |data: &[T]| -> Vec<u32> { data.iter().map(|v| codec.code(v) as u32).collect() };
    let (sorted, queries) = (encode(src), encode(values));

    let mut write = write;
    Some(with_executor(|exec| exec.run(&sorted, &queries, mode)).map(|raw| {
        for (i, r) in raw.into_iter().enumerate() {
            write(i, r);
        }
    }))
}

impl Backend for GpuBackend {
    fn name(&self) -> &'static str {
        "wgpu"
    }

    fn lower_bound_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [usize],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        let mode = SearchMode::LowerBound;
        match device_queries::<T, C>("lower_bound_many", src, values, mode, |i, r| {
            if let Some(slot) = out.get_mut(i) {
                *slot = r as usize;
            }
        }) {
            Some(result) => result,
            None => {
                search::lower_bound_many(src, values, out, comp);
                Ok(())
            }
        }
    }

    fn upper_bound_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [usize],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        let mode = SearchMode::UpperBound;
        match device_queries::<T, C>("upper_bound_many", src, values, mode, |i, r| {
            if let Some(slot) = out.get_mut(i) {
                *slot = r as usize;
            }
        }) {
            Some(result) => result,
            None => {
                search::upper_bound_many(src, values, out, comp);
                Ok(())
            }
        }
    }

    fn binary_search_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [bool],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        let mode = SearchMode::Contains;
        match device_queries::<T, C>("binary_search_many", src, values, mode, |i, r| {
            if let Some(slot) = out.get_mut(i) {
                *slot = r != 0;
            }
        }) {
            Some(result) => result,
            None => {
                search::binary_search_many(src, values, out, comp);
                Ok(())
            }
        }
    }
}
