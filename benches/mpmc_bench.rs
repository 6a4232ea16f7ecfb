use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lfq::Queue;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn single_threaded_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_threaded_throughput");

    for depth in [64, 256, 1024, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("enqueue_dequeue", depth), depth, |b, &depth| {
            let queue = Queue::create(depth).unwrap();
            let batch_size = std::cmp::min(depth / 2, 1000);

            b.iter(|| {
                for i in 1..=batch_size {
                    while queue.enqueue(black_box(i)).is_err() {
                        if queue.dequeue() != lfq::ABSENT_PAYLOAD {
                            break;
                        }
                    }
                }
                for _ in 0..batch_size {
                    while queue.dequeue() == lfq::ABSENT_PAYLOAD {
                        if queue.enqueue(black_box(999)).is_ok() {
                            break;
                        }
                    }
                }
            });
        });
    }

    group.finish();
}

fn multi_producer_single_consumer(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_producer_single_consumer");

    for num_producers in [1, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("producers", num_producers),
            num_producers,
            |b, &num_producers| {
                b.iter_custom(|iters| {
                    let queue = Arc::new(Queue::create(1024).unwrap());
                    let items_per_producer = (iters as usize) / num_producers;

                    let start = Instant::now();
                    let mut producer_handles = Vec::new();

                    for producer_id in 0..num_producers {
                        let queue_clone = Arc::clone(&queue);
                        producer_handles.push(thread::spawn(move || {
                            for i in 0..items_per_producer {
                                let value = producer_id * items_per_producer + i + 1;
                                while queue_clone.enqueue(black_box(value)).is_err() {
                                    thread::yield_now();
                                }
                            }
                        }));
                    }

                    let consumer_queue = Arc::clone(&queue);
                    let consumer_handle = thread::spawn(move || {
                        let total_items = items_per_producer * num_producers;
                        for _ in 0..total_items {
                            while consumer_queue.dequeue() == lfq::ABSENT_PAYLOAD {
                                thread::yield_now();
                            }
                        }
                    });

                    for handle in producer_handles {
                        handle.join().unwrap();
                    }
                    consumer_handle.join().unwrap();

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn multi_producer_multi_consumer(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_producer_multi_consumer");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    for thread_pairs in [1, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("thread_pairs", thread_pairs),
            thread_pairs,
            |b, &thread_pairs| {
                let queue = Arc::new(Queue::create(1024).unwrap());

                b.iter(|| {
                    for i in 1..=10 {
                        let _ = queue.enqueue(black_box(i));
                    }

                    let barrier = Arc::new(std::sync::Barrier::new(thread_pairs * 2));
                    let mut handles = Vec::new();

                    for _ in 0..thread_pairs {
                        let queue_clone = Arc::clone(&queue);
                        let barrier_clone = Arc::clone(&barrier);
                        handles.push(std::thread::spawn(move || {
                            barrier_clone.wait();
                            for i in 1..=10 {
                                while queue_clone.enqueue(black_box(i)).is_err() {
                                    std::hint::spin_loop();
                                }
                            }
                        }));
                    }

                    for _ in 0..thread_pairs {
                        let queue_clone = Arc::clone(&queue);
                        let barrier_clone = Arc::clone(&barrier);
                        handles.push(std::thread::spawn(move || {
                            barrier_clone.wait();
                            for _ in 0..10 {
                                while queue_clone.dequeue() == lfq::ABSENT_PAYLOAD {
                                    std::hint::spin_loop();
                                }
                            }
                        }));
                    }

                    for handle in handles {
                        handle.join().unwrap();
                    }

                    while queue.dequeue() != lfq::ABSENT_PAYLOAD {}
                });
            },
        );
    }

    group.finish();
}

fn latency_measurement(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency");

    group.bench_function("enqueue_dequeue_latency", |b| {
        let queue = Queue::create(1024).unwrap();

        b.iter(|| {
            queue.enqueue(black_box(42)).unwrap();
            black_box(queue.dequeue());
        });
    });

    group.finish();
}

fn contention_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    for depth in [16, 64, 256].iter() {
        group.bench_with_input(
            BenchmarkId::new("high_contention", depth),
            depth,
            |b, &depth| {
                b.iter_custom(|iters| {
                    let queue = Arc::new(Queue::create(depth).unwrap());
                    let num_threads = 16;
                    let items_per_thread = (iters as usize) / num_threads;

                    let start = Instant::now();
                    let mut handles = Vec::new();

                    for i in 0..num_threads {
                        let queue_clone = Arc::clone(&queue);

                        if i < num_threads / 2 {
                            handles.push(thread::spawn(move || {
                                for j in 0..items_per_thread {
                                    let value = i * items_per_thread + j + 1;
                                    while queue_clone.enqueue(black_box(value)).is_err() {
                                        thread::yield_now();
                                    }
                                }
                            }));
                        } else {
                            handles.push(thread::spawn(move || {
                                for _ in 0..items_per_thread {
                                    while queue_clone.dequeue() == lfq::ABSENT_PAYLOAD {
                                        thread::yield_now();
                                    }
                                }
                            }));
                        }
                    }

                    for handle in handles {
                        handle.join().unwrap();
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    single_threaded_throughput,
    multi_producer_single_consumer,
    multi_producer_multi_consumer,
    latency_measurement,
    contention_benchmark
);
criterion_main!(benches);
