use lfq::{Consumer, Producer, PtrQueue};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    println!("Lock-Free MPMC Ring Queue Demo");
    println!("===============================");

    let queue = Arc::new(PtrQueue::new(64).expect("failed to allocate queue"));

    let producer1 = Producer::new(Arc::clone(&queue));
    let producer2 = Producer::new(Arc::clone(&queue));
    let consumer1 = Consumer::new(Arc::clone(&queue));
    let consumer2 = Consumer::new(Arc::clone(&queue));

    println!("Queue capacity: {}", queue.capacity());

    tokio::spawn(async move {
        for i in 0..10 {
            match producer1.send(format!("Producer1: {i}")) {
                Ok(()) => println!("✓ Producer1 sent: {i}"),
                Err(item) => println!("✗ Producer1 failed to send: {item}"),
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }
    });

    tokio::spawn(async move {
        for i in 0..10 {
            match producer2.send(format!("Producer2: {i}")) {
                Ok(()) => println!("✓ Producer2 sent: {i}"),
                Err(item) => println!("✗ Producer2 failed to send: {item}"),
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(75)).await;
        }
    });

    tokio::spawn(async move {
        for _ in 0..10 {
            match consumer1.recv() {
                Some(msg) => println!("📨 Consumer1 received: {msg}"),
                None => println!("📭 Consumer1 found empty queue"),
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        }
    });

    tokio::spawn(async move {
        for _ in 0..10 {
            match consumer2.recv() {
                Some(msg) => println!("📨 Consumer2 received: {msg}"),
                None => println!("📭 Consumer2 found empty queue"),
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(120)).await;
        }
    });

    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

    println!("\nFinal queue state:");
    println!("- Capacity: {}", queue.capacity());
    println!("- Length: {}", queue.len());
    println!("- Is empty: {}", queue.is_empty());
    println!("- Is full: {}", queue.is_full());

    println!("\nMPMC queue demo completed!");
}
