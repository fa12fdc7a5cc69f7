use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::WriteError;
use crate::http::response::Response;

fn serialize_response(resp: &Response) -> Bytes {
    let body = resp.body.as_ref();
    let mut buf = BytesMut::with_capacity(resp.header.len() + body.len() + 1);

    buf.put_slice(resp.header.as_bytes());
    buf.put_slice(body);
    buf.put_u8(b'\n');

    buf.freeze()
}

/// Holds one serialized response until it has been written out.
///
/// Building the writer consumes the [`Response`], so a mapped body is
/// released as soon as its bytes have been copied into the send buffer.
pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            buffer: serialize_response(&response),
            written: 0,
        }
    }

    /// Size of the serialized response, trailing newline included.
    pub fn total_len(&self) -> usize {
        self.buffer.len()
    }

    /// Writes the whole buffer and returns the number of bytes sent.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<usize, WriteError>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(WriteError::Other(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed while writing",
                )));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(self.written)
    }
}
