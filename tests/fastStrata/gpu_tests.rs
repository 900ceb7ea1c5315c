#![cfg(feature = "dev")]
#![cfg(feature = "gpu")]
use fastStrata::gpu::{GpuBackend, GpuExecutor, SearchMode};
use fastStrata::prelude::*;

/// Run `check` only when a device is available.
fn with_device(result: Result<(), StrataError>, check: impl FnOnce()) {
    match result {
        Ok(()) => check(),
        Err(StrataError::Device(msg)) => println!("GPU unavailable, skipping: {msg}"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_gpu_executor_modes() {
    let Ok(mut exec) = pollster::block_on(GpuExecutor::new()) else {
        println!("GPU unavailable, skipping");
        return;
    };

    let sorted = [1u32, 2, 2, 2, 4];
    let queries = [0u32, 2, 3, 4, 5];

    let lower = exec.run(&sorted, &queries, SearchMode::LowerBound).unwrap();
    let upper = exec.run(&sorted, &queries, SearchMode::UpperBound).unwrap();
    let found = exec.run(&sorted, &queries, SearchMode::Contains).unwrap();

    assert_eq!(lower, [0, 1, 4, 4, 5]);
    assert_eq!(upper, [0, 4, 4, 5, 5]);
    assert_eq!(found, [0, 1, 0, 1, 0]);
}

#[test]
fn test_gpu_lower_bound_many() {
    let sorted: Vec<u32> = (0..10_000).map(|i| i * 2).collect();
    let queries: Vec<u32> = (0..5_000).map(|i| i * 3).collect();
    let mut out = vec![0usize; queries.len()];

    let result = dispatcher().lower_bound_many(
        Accelerator::view(&sorted),
        Accelerator::view(&queries),
        Accelerator::view_mut(&mut out),
    );

    with_device(result, || {
        for (q, &pos) in queries.iter().zip(&out) {
            assert_eq!(pos, sorted.partition_point(|&x| x < *q));
        }
    });
}

#[test]
fn test_gpu_signed_and_float_keys() {
    let sorted = [-3i32, -1, 0, 0, 7];
    let queries = [-2i32, 0, 8];
    let mut upper = [0usize; 3];

    let result = dispatcher().upper_bound_many(
        Accelerator::view(&sorted),
        Accelerator::view(&queries),
        Accelerator::view_mut(&mut upper),
    );
    with_device(result, || assert_eq!(upper, [1, 4, 5]));

    let sorted = [-1.5f32, -0.0, 2.5];
    let queries = [0.0f32, 1.0];
    let mut found = [false; 2];

    let result = dispatcher().binary_search_many(
        Accelerator::view(&sorted),
        Accelerator::view(&queries),
        Accelerator::view_mut(&mut found),
    );
    with_device(result, || assert_eq!(found, [true, false]));
}

#[test]
fn test_gpu_descending_order() {
    let sorted = [9u8, 7, 7, 3];
    let queries = [7u8];
    let mut out = [0usize; 1];

    let result = dispatcher().lower_bound_many_by(
        Accelerator::view(&sorted),
        Accelerator::view(&queries),
        Accelerator::view_mut(&mut out),
        Greater::new(),
    );
    with_device(result, || assert_eq!(out, [1]));
}

#[test]
fn test_gpu_falls_back_on_host_types() {
    let sorted = vec![1u64 << 40, 1 << 41];
    let queries = vec![1u64 << 41];
    let mut found = vec![false];

    // 64-bit keys never reach the device
    dispatcher()
        .binary_search_many(
            Accelerator::view(&sorted),
            Accelerator::view(&queries),
            Accelerator::view_mut(&mut found),
        )
        .unwrap();
    assert_eq!(found, [true]);

    // Operations without a device kernel run on the host
    let mut keys = vec![3u32, 1, 2];
    dispatcher()
        .stable_sort(Accelerator::view_mut(&mut keys))
        .unwrap();
    assert_eq!(keys, [1, 2, 3]);
    assert_eq!(GpuBackend::new().name(), "wgpu");
}
