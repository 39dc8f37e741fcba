//! Host embedding handshake.

use log::debug;

/// The environment the game is mounted in.
pub trait Host {
    /// Tell the host the game has mounted and is ready for input.
    fn signal_ready(&mut self);
}

/// Delivers the readiness signal at most once, however often it is announced.
#[derive(Debug)]
pub struct ReadySignal<H: Host> {
    host: H,
    sent: bool,
}

impl<H: Host> ReadySignal<H> {
    pub fn new(host: H) -> Self {
        ReadySignal { host, sent: false }
    }

    /// Returns `true` only on the call that actually signalled the host.
    pub fn announce(&mut self) -> bool {
        if self.sent {
            debug!("readiness already signalled");
            return false;
        }
        self.host.signal_ready();
        self.sent = true;
        true
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
