//! Integration tests for result stream delivery
//!
//! Tests cover:
//! - Concurrent blocking consumers
//! - Async consumers and the futures::Stream adapter
//! - Close-once and no-append-after-close

use super::test_utils::JoinFixture;
use atomjoin::store::builtin::*;
use atomjoin::{JoinError, JoinQuery, NodeId, ResultStream, StreamError};
use futures::StreamExt;
use std::thread;
use std::time::Duration;

#[test]
fn test_many_blocking_consumers_see_every_item() {
    let stream = ResultStream::new();
    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let reader = stream.reader();
            thread::spawn(move || reader.collect::<Vec<_>>())
        })
        .collect();

    for i in 0..100 {
        stream.push(NodeId(i)).unwrap();
        if i % 25 == 0 {
            thread::sleep(Duration::from_millis(1));
        }
    }
    stream.close().unwrap();

    let expected: Vec<NodeId> = (0..100).map(NodeId).collect();
    for consumer in consumers {
        assert_eq!(consumer.join().unwrap(), expected);
    }
}

#[test]
fn test_reads_after_close_do_not_block() {
    let stream = ResultStream::new();
    stream.push(NodeId(1)).unwrap();
    stream.close().unwrap();

    let mut reader = stream.reader();
    assert_eq!(reader.next(), Some(NodeId(1)));
    assert_eq!(reader.next(), None);
    assert_eq!(reader.next(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_consumer_drains_stream() {
    let stream = ResultStream::new();
    let reader = stream.reader();
    let consumer = tokio::spawn(async move { reader.into_stream().collect::<Vec<_>>().await });

    let producer = stream.clone();
    tokio::task::spawn_blocking(move || {
        for i in 0..10 {
            producer.push(NodeId(i)).unwrap();
        }
        producer.close().unwrap();
    })
    .await
    .unwrap();

    let items = consumer.await.unwrap();
    assert_eq!(items, (0..10).map(NodeId).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_async_reader_on_executed_query() {
    let f = JoinFixture::new();
    let query = JoinQuery::new(&f.store, f.join_atom(JOIN_LINK), f.single_variable()).unwrap();
    let stream = query.execute(&f.store, false).unwrap();

    let mut reader = stream.reader();
    assert_eq!(reader.recv().await, Some(f.foo));
    assert_eq!(reader.recv().await, None);
}

#[test]
fn test_executed_stream_rejects_further_appends() {
    let f = JoinFixture::new();
    let query = JoinQuery::new(&f.store, f.join_atom(JOIN_LINK), f.single_variable()).unwrap();
    let stream = query.execute(&f.store, false).unwrap();

    assert_eq!(
        stream.push(f.x),
        Err(StreamError::PushAfterClose(f.x))
    );
    assert_eq!(stream.close(), Err(StreamError::AlreadyClosed));
    assert_eq!(stream.snapshot(), vec![f.foo]);

    let violation: JoinError = StreamError::AlreadyClosed.into();
    assert!(!violation.is_recoverable());
}
