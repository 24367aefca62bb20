//! VICI client over the daemon's Unix control socket.

use super::packet::{Packet, MAX_PACKET_LEN};
use super::{Message, ViciError};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

pub struct ViciClient {
    stream: UnixStream,
}

impl ViciClient {
    pub async fn connect(path: impl AsRef<Path>) -> Result<ViciClient, ViciError> {
        let path = path.as_ref();
        log::debug!("connect({})", path.display());
        let stream = UnixStream::connect(path)
            .await
            .map_err(|source| ViciError::Connect {
                path: path.display().to_string(),
                source,
            })?;
        Ok(ViciClient { stream })
    }

    /// Send one request and wait for its response.
    ///
    /// Event packets arriving before the response are skipped.
    pub async fn submit(&mut self, request: &Packet) -> Result<Message, ViciError> {
        let command = match request {
            Packet::Request { command, .. } => command.clone(),
            other => return Err(ViciError::Decode(format!("not a request: {other:?}"))),
        };
        let bytes = request.encode()?;
        log::debug!("submit '{command}' {} bytes", bytes.len());
        self.stream.write_all(&bytes).await?;

        loop {
            match self.read_packet().await? {
                Packet::Response(message) => return Ok(message),
                Packet::UnknownCommand => return Err(ViciError::UnknownCommand(command)),
                Packet::Event { name, .. } => log::debug!("skip event '{name}'"),
                other => log::warn!("unexpected packet while waiting for '{command}': {other:?}"),
            }
        }
    }

    async fn read_packet(&mut self) -> Result<Packet, ViciError> {
        let len = self.stream.read_u32().await? as usize;
        if len > MAX_PACKET_LEN {
            return Err(ViciError::PacketTooLarge(len));
        }
        let mut body = vec![0u8; len];
        self.stream.read_exact(&mut body).await?;
        Packet::decode(&body)
    }
}
