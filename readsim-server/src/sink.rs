//! Bridges the blocking pipeline to the async response body.

use std::io;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use readsim_stream::{OutputSink, SinkClosed};

pub type BodyChunk = Result<Bytes, io::Error>;

///
/// Output sink feeding a bounded channel. Writes block while the channel is
/// full, so a slow client slows down the pipeline instead of growing a buffer.
///
/// Must only be used from a blocking thread.
///
pub struct ChannelSink {
    tx: mpsc::Sender<BodyChunk>,
}

impl ChannelSink {
    ///
    /// Abort the response body. The client sees a truncated response instead
    /// of a clean end of stream.
    ///
    pub fn fail(&self, message: String) {
        let _ = self.tx.blocking_send(Err(io::Error::other(message)));
    }
}

impl OutputSink for ChannelSink {
    fn write_chunk(&mut self, bytes: Vec<u8>) -> Result<(), SinkClosed> {
        self.tx
            .blocking_send(Ok(Bytes::from(bytes)))
            .map_err(|_| SinkClosed)
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A sink and the stream that becomes the response body.
pub fn channel(capacity: usize) -> (ChannelSink, ReceiverStream<BodyChunk>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ChannelSink { tx }, ReceiverStream::new(rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_stream::StreamExt;

    use readsim_core::SimulationParams;
    use readsim_stream::errors::Result as StreamResult;
    use readsim_stream::{ReadSimulator, SimulationPipeline};

    struct EchoSimulator;

    impl ReadSimulator for EchoSimulator {
        fn simulate(&self, sequence: &str, _: &SimulationParams, _: &str) -> StreamResult<Vec<u8>> {
            Ok(sequence.as_bytes().to_vec())
        }
    }

    /// Counts how many bytes were pulled from it.
    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        pulled: Arc<AtomicUsize>,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.pulled.fetch_add(n, Ordering::SeqCst);
            Ok(n)
        }
    }

    #[tokio::test]
    async fn test_chunks_arrive_in_order() {
        let (mut sink, mut body) = channel(1);
        let writer = tokio::task::spawn_blocking(move || {
            sink.write_chunk(b"first".to_vec()).unwrap();
            sink.write_chunk(b"second".to_vec()).unwrap();
        });

        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from_static(b"first"));
        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from_static(b"second"));
        writer.await.unwrap();
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn test_dropped_body_closes_sink() {
        let (mut sink, body) = channel(1);
        assert!(!sink.is_closed());
        drop(body);
        assert!(sink.is_closed());
        let result = tokio::task::spawn_blocking(move || sink.write_chunk(b"lost".to_vec()))
            .await
            .unwrap();
        assert_eq!(result, Err(SinkClosed));
    }

    #[tokio::test]
    async fn test_fail_yields_an_error_item() {
        let (sink, mut body) = channel(1);
        tokio::task::spawn_blocking(move || sink.fail("simulator exited".to_string()))
            .await
            .unwrap();
        assert!(body.next().await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_disconnect_stops_pipeline_on_unknown_only_region() {
        let (mut sink, body) = channel(4);
        drop(body);

        let pulled = Arc::new(AtomicUsize::new(0));
        let upstream = CountingReader {
            inner: Cursor::new(b"NNNNNNNNNN\n".repeat(100_000)),
            pulled: pulled.clone(),
        };
        let summary = tokio::task::spawn_blocking(move || {
            let params = SimulationParams::default();
            SimulationPipeline::new(&EchoSimulator, &params, "chrN:0-1000000")
                .run(upstream, &mut sink)
                .unwrap()
        })
        .await
        .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.bytes_emitted, 0);
        assert_eq!(pulled.load(Ordering::SeqCst), 0);
    }
}
