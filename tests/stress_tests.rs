//! Stress tests for the producer/consumer pipeline
//!
//! These tests verify:
//! - Nothing is lost when many producers hammer a small queue
//! - Each producer's lines keep their relative order
//! - Concurrent threshold changes never corrupt the pipeline

use log4u::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_many_producers_small_queue() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Log4u::builder()
            .queue_capacity(4)
            .colors(false)
            .console(false)
            .log_dir(temp_dir.path())
            .drain_warmup(Duration::from_millis(10))
            .build()
            .expect("Failed to create logger"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.outf(format_args!("t{} {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.wait();

    let content = std::fs::read_to_string(temp_dir.path().join("log4u.log"))
        .expect("Failed to read log file");
    let mut last_seen: HashMap<String, usize> = HashMap::new();
    let mut total = 0;
    for line in content.lines() {
        let (thread, seq) = line.split_once(' ').expect("thread and sequence");
        let seq: usize = seq.parse().expect("numeric sequence");
        if let Some(prev) = last_seen.insert(thread.to_string(), seq) {
            assert_eq!(seq, prev + 1, "out of order for {}", thread);
        } else {
            assert_eq!(seq, 0, "first line of {} missing", thread);
        }
        total += 1;
    }

    assert_eq!(total, THREADS * PER_THREAD, "no record may be dropped");
    assert_eq!(logger.metrics().written(), (THREADS * PER_THREAD) as u64);
    assert!(logger.metrics().block_events() > 0, "a 4-slot queue should have filled up");
}

#[test]
fn test_level_changes_under_load() {
    let buffer = MemorySink::new();
    let sink = buffer.clone();
    let logger = Arc::new(
        Log4u::builder()
            .queue_capacity(16)
            .colors(false)
            .drain_warmup(Duration::ZERO)
            .sink_provider(FnSinkProvider::new(move |_| Ok(Box::new(sink.clone()))))
            .build()
            .expect("Failed to create logger"),
    );

    let toggler = {
        let logger = Arc::clone(&logger);
        std::thread::spawn(move || {
            for i in 0..2000u32 {
                logger.set_level_raw((i % 6) as u8);
            }
        })
    };

    let producers: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..250 {
                    logger.errorf(format_args!("e{}", i));
                    logger.infof(format_args!("i{}", i));
                }
            })
        })
        .collect();

    toggler.join().expect("toggler panicked");
    for producer in producers {
        producer.join().expect("producer panicked");
    }
    logger.wait();

    let metrics = logger.metrics();
    let lines = buffer.lines();
    let errors = lines.iter().filter(|line| line.contains("ERROR e")).count();
    let infos = lines.iter().filter(|line| line.contains("INFO i")).count();

    // errors bypass the gate; infos are split between written and suppressed
    assert_eq!(errors, 1000);
    assert_eq!(infos as u64 + metrics.suppressed(), 1000);
    assert_eq!(metrics.written(), lines.len() as u64);
    assert_eq!(metrics.pending(), 0);
}

#[test]
fn test_repeated_build_and_drop() {
    for round in 0..20 {
        let buffer = MemorySink::new();
        let sink = buffer.clone();
        let logger = Log4u::builder()
            .queue_capacity(2)
            .sink_provider(FnSinkProvider::new(move |_| Ok(Box::new(sink.clone()))))
            .build()
            .expect("Failed to create logger");
        for i in 0..25 {
            logger.outf(format_args!("{} {}", round, i));
        }
        drop(logger);
        assert_eq!(buffer.lines().len(), 25, "round {} lost records on drop", round);
    }
}
