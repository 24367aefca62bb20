//! VICI packet framing.
//!
//! On the wire every packet is a 4 byte big-endian length followed by the
//! body. The body starts with the packet type; named packets carry a u8
//! length prefixed name before the message elements. Types 3 to 6 belong to
//! event (un)registration and are not used here.

use super::message::{get_name, put_name, Message};
use super::ViciError;
use bytes::{BufMut, BytesMut};
use std::fmt;

/// Largest packet body accepted from the daemon.
pub const MAX_PACKET_LEN: usize = 512 * 1024;

const CMD_REQUEST: u8 = 0;
const CMD_RESPONSE: u8 = 1;
const CMD_UNKNOWN: u8 = 2;
const EVENT: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Request { command: String, message: Message },
    Response(Message),
    UnknownCommand,
    Event { name: String, message: Message },
}

impl Packet {
    pub fn request(command: &str, message: Message) -> Packet {
        Packet::Request {
            command: command.to_string(),
            message,
        }
    }

    /// Encode including the length header.
    pub fn encode(&self) -> Result<BytesMut, ViciError> {
        let mut body = BytesMut::new();
        match self {
            Packet::Request { command, message } => {
                body.put_u8(CMD_REQUEST);
                put_name(&mut body, command)?;
                message.encode_into(&mut body)?;
            }
            Packet::Response(message) => {
                body.put_u8(CMD_RESPONSE);
                message.encode_into(&mut body)?;
            }
            Packet::UnknownCommand => body.put_u8(CMD_UNKNOWN),
            Packet::Event { name, message } => {
                body.put_u8(EVENT);
                put_name(&mut body, name)?;
                message.encode_into(&mut body)?;
            }
        }

        if body.len() > MAX_PACKET_LEN {
            return Err(ViciError::PacketTooLarge(body.len()));
        }
        let mut packet = BytesMut::with_capacity(4 + body.len());
        packet.put_u32(body.len() as u32);
        packet.extend_from_slice(&body);
        Ok(packet)
    }

    /// Decode a packet body (without the length header).
    ///
    /// Event (un)registration packets are never requested by this client and
    /// decode to [`ViciError::UnexpectedPacket`].
    pub fn decode(body: &[u8]) -> Result<Packet, ViciError> {
        let (&kind, mut rest) = body
            .split_first()
            .ok_or_else(|| ViciError::Decode("empty packet".into()))?;
        let packet = match kind {
            CMD_REQUEST => {
                let command = get_name(&mut rest)?;
                Packet::Request {
                    command,
                    message: Message::decode(rest)?,
                }
            }
            CMD_RESPONSE => Packet::Response(Message::decode(rest)?),
            CMD_UNKNOWN => Packet::UnknownCommand,
            EVENT => {
                let name = get_name(&mut rest)?;
                Packet::Event {
                    name,
                    message: Message::decode(rest)?,
                }
            }
            other => return Err(ViciError::UnexpectedPacket(other)),
        };
        Ok(packet)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Packet::Request { command, message } | Packet::Event { name: command, message } => {
                writeln!(f, "{command} {{")?;
                message.render(f, 1)?;
                write!(f, "}}")
            }
            Packet::Response(message) => write!(f, "{message}"),
            other => write!(f, "{other:?}"),
        }
    }
}
