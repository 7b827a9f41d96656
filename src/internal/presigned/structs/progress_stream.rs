use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;

/// 请求体流包装：每发出一段数据就回调一次（累计字节、总字节）。
///
/// 回调发生在 HTTP 客户端拉取数据时，即字节交给连接的时刻。
pub struct ProgressStream<S, F> {
    inner: S,
    bytes_sent: u64,
    total: u64,
    on_progress: F,
}

impl<S, F> ProgressStream<S, F>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
    F: FnMut(u64, u64) + Unpin,
{
    pub fn new(inner: S, total: u64, on_progress: F) -> Self {
        Self {
            inner,
            bytes_sent: 0,
            total,
            on_progress,
        }
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }
}

impl<S, F> Stream for ProgressStream<S, F>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
    F: FnMut(u64, u64) + Unpin,
{
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.bytes_sent += chunk.len() as u64;
                (this.on_progress)(this.bytes_sent, this.total);
                Poll::Ready(Some(Ok(chunk)))
            }
            other => other,
        }
    }
}
