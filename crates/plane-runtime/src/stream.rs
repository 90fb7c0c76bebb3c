//! Async stream log readers (non-UTF8-safe) feeding the event bus.
//!
//! Worker processes can emit non-UTF8 bytes. Using `BufReader::lines()`
//! would terminate the reader task on invalid UTF-8, so lines are read as
//! bytes and decoded lossily.

use plane_core::StreamKey;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::bus::KeyedEventBus;

/// Publish every line of `stream` under `key` until EOF.
pub fn spawn_stream_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    key: StreamKey,
    bus: Arc<KeyedEventBus>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        read_lines(stream, |line| {
            bus.publish(key, line);
        })
        .await;
        debug!(%key, "log stream reader task exiting");
    })
}

/// Publish lines of a multiplexed feed onto their own keys until EOF.
///
/// Each line must look like `"{process_id}_{world_index} {text}"`. Lines
/// without a valid key prefix are skipped.
pub fn spawn_tagged_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    bus: Arc<KeyedEventBus>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        read_lines(stream, |line| match parse_tagged_line(&line) {
            Some((key, text)) => {
                bus.publish(key, text);
            }
            None => trace!(%line, "skipping untagged line"),
        })
        .await;
        debug!("tagged log reader task exiting");
    })
}

/// Split a tagged feed line into its stream key and text.
pub fn parse_tagged_line(line: &str) -> Option<(StreamKey, &str)> {
    let (tag, text) = line.split_once(' ').unwrap_or((line, ""));
    let key = tag.parse().ok()?;
    Some((key, text))
}

async fn read_lines(stream: impl AsyncRead + Unpin, mut on_line: impl FnMut(String)) {
    let mut reader = BufReader::new(stream);
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break, // EOF
            Ok(_) => {
                // Trim trailing newline(s)
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                on_line(String::from_utf8_lossy(&buf).into_owned());
            }
            Err(e) => {
                debug!(error = %e, "log stream reader exiting due to read error");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogStore;

    fn collect(bus: &Arc<KeyedEventBus>, key: StreamKey) -> Arc<LogStore> {
        let store = Arc::new(LogStore::new());
        let sink = Arc::clone(&store);
        bus.subscribe(key, move |line| {
            sink.append(key, line.clone());
        });
        store
    }

    #[tokio::test]
    async fn test_reader_publishes_lines_under_key() {
        let bus = Arc::new(KeyedEventBus::new());
        let key = StreamKey::new(1, 0);
        let store = collect(&bus, key);

        let input: &[u8] = b"first\r\nsecond\n\xffbad\nlast";
        spawn_stream_reader(input, key, Arc::clone(&bus)).await.unwrap();

        assert_eq!(
            store.get(key).to_strings(),
            vec!["first", "second", "\u{fffd}bad", "last"]
        );
    }

    #[tokio::test]
    async fn test_tagged_reader_demultiplexes() {
        let bus = Arc::new(KeyedEventBus::new());
        let a = StreamKey::new(1, 0);
        let b = StreamKey::new(1, 1);
        let store_a = collect(&bus, a);
        let store_b = collect(&bus, b);

        let input: &[u8] = b"1_0 alpha\n1_1 beta\nnoise\n1_0 gamma\n";
        spawn_tagged_reader(input, Arc::clone(&bus)).await.unwrap();

        assert_eq!(store_a.get(a).to_strings(), vec!["alpha", "gamma"]);
        assert_eq!(store_b.get(b).to_strings(), vec!["beta"]);
    }

    #[test]
    fn test_parse_tagged_line() {
        assert_eq!(
            parse_tagged_line("3_0 [00:01]: saved"),
            Some((StreamKey::new(3, 0), "[00:01]: saved"))
        );
        assert_eq!(parse_tagged_line("3_0"), Some((StreamKey::new(3, 0), "")));
        assert_eq!(parse_tagged_line("hello world"), None);
    }
}
