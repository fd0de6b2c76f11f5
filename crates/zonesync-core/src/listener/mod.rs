//! NOTIFY listener
//!
//! One long-lived task owns the receive loop; every datagram is handed to a
//! freshly spawned handler so a slow peer (or a slow update) never blocks
//! the loop. For every decodable datagram exactly one reply is sent back to
//! its origin; undecodable datagrams are logged and dropped without a reply,
//! since there is no reliable id/question to echo.

use std::net::SocketAddr;
use std::sync::Arc;

use hickory_proto::op::ResponseCode;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::Result;
use crate::notify::{self, MAX_DATAGRAM, ValidationOutcome};
use crate::pipeline::UpdatePipeline;

/// UDP listener owning the bound notification socket
pub struct Listener {
    socket: Arc<UdpSocket>,
    pipeline: Arc<UpdatePipeline>,
}

impl Listener {
    /// Bind the configured address/port and attach the update pipeline
    pub async fn bind(config: &Config, pipeline: Arc<UpdatePipeline>) -> Result<Self> {
        let addr = config.socket.bind_addr()?;
        let socket = UdpSocket::bind(addr).await?;
        info!(addr = %socket.local_addr()?, "listening for NOTIFY");

        Ok(Self {
            socket: Arc::new(socket),
            pipeline,
        })
    }

    /// The actually bound address (relevant when the port was 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Run the receive loop. Returns only on a socket error.
    pub async fn run(self) -> Result<()> {
        let mut buf = [0u8; MAX_DATAGRAM];

        loop {
            let (len, peer) = self.socket.recv_from(&mut buf).await?;
            let datagram = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let pipeline = Arc::clone(&self.pipeline);

            tokio::spawn(async move {
                handle_datagram(socket, pipeline, datagram, peer).await;
            });
        }
    }
}

/// Handle one received datagram: decode, validate, reply, and on acceptance
/// schedule the zone update.
async fn handle_datagram(
    socket: Arc<UdpSocket>,
    pipeline: Arc<UpdatePipeline>,
    datagram: Vec<u8>,
    peer: SocketAddr,
) {
    let message = match notify::decode(&datagram) {
        Ok(message) => message,
        Err(err) => {
            error!(%peer, %err, "dropping undecodable datagram");
            return;
        }
    };
    debug!(%peer, id = message.id(), "got query");

    let reply = match notify::validate(&message) {
        ValidationOutcome::Accepted { zone } => {
            info!(%peer, zone = zone.raw(), "NOTIFY accepted");
            // Scheduled before the ack goes out; neither depends on the other.
            pipeline.spawn_update(zone);
            notify::build_reply(&message, ResponseCode::NoError, true)
        }
        ValidationOutcome::Rejected { code, reason } => {
            error!(%peer, %code, "{reason}");
            notify::build_reply(&message, code, false)
        }
    };

    match notify::encode(&reply) {
        Ok(bytes) => {
            if let Err(err) = socket.send_to(&bytes, peer).await {
                error!(%peer, %err, "sending response failed");
                return;
            }
            debug!(%peer, "sent response");
        }
        Err(err) => error!(%peer, %err, "encoding response failed"),
    }
}
