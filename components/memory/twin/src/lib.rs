//! Shared memory model and the multi-port arbiter.
//!
//! A behavioral, word-addressed (16-bit) memory with upload/readback
//! helpers, fronted by a request/acknowledge arbiter with one port per
//! pipeline client. Single-word requests complete in their grant cycle;
//! burst reads stream one word per cycle and are preempted at word
//! boundaries when another port is waiting. Rotating priority bounds
//! every port's wait, so no port starves.

use ember_twin_core::mem::{MemRequest, PortEvent, PortId};

/// Behavioral memory: out-of-range reads return zero, out-of-range
/// writes are dropped.
pub struct Memory {
    words: Vec<u16>,
}

impl Default for Memory {
    fn default() -> Self {
        // 8 MiB, the size of the board's SDRAM part.
        Self::with_words(1 << 22)
    }
}

impl Memory {
    #[must_use]
    pub fn with_words(len: usize) -> Self {
        Self {
            words: vec![0; len],
        }
    }

    #[must_use]
    pub fn read(&self, addr: u32) -> u16 {
        self.words.get(addr as usize).copied().unwrap_or(0)
    }

    pub fn write(&mut self, addr: u32, data: u16) {
        if let Some(word) = self.words.get_mut(addr as usize) {
            *word = data;
        }
    }

    /// Upload raw little-endian bytes starting at a word address.
    pub fn upload_bytes(&mut self, word_addr: u32, data: &[u8]) {
        for (i, pair) in data.chunks(2).enumerate() {
            let lo = u16::from(pair[0]);
            let hi = pair.get(1).map_or(0, |&b| u16::from(b));
            self.write(word_addr + i as u32, lo | (hi << 8));
        }
    }

    /// Read a run of words (test/readback convenience).
    #[must_use]
    pub fn read_run(&self, word_addr: u32, len: usize) -> Vec<u16> {
        (0..len).map(|i| self.read(word_addr + i as u32)).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Burst {
    port: usize,
    addr: u32,
    remaining: u16,
}

/// The memory arbiter. One outstanding request per port; one memory
/// access per cycle.
pub struct Arbiter {
    pub mem: Memory,
    requests: [Option<MemRequest>; PortId::COUNT],
    events: [Option<PortEvent>; PortId::COUNT],
    burst: Option<Burst>,
    /// Next port offset to scan first. Advances past each completed or
    /// preempted grant, so every waiting port is reached within one
    /// rotation.
    rotate: usize,
}

impl Default for Arbiter {
    fn default() -> Self {
        Self::new(Memory::default())
    }
}

impl Arbiter {
    #[must_use]
    pub fn new(mem: Memory) -> Self {
        Self {
            mem,
            requests: [None; PortId::COUNT],
            events: [None; PortId::COUNT],
            burst: None,
            rotate: 0,
        }
    }

    /// Post a request on a port. The port must be free; the caller
    /// retries the identical request after a preemption.
    pub fn request(&mut self, port: PortId, req: MemRequest) {
        debug_assert!(self.requests[port.index()].is_none());
        self.requests[port.index()] = Some(req);
    }

    /// A request is outstanding on this port.
    #[must_use]
    pub fn pending(&self, port: PortId) -> bool {
        self.requests[port.index()].is_some()
    }

    /// Take this cycle's completion event for a port, if any.
    pub fn take_event(&mut self, port: PortId) -> Option<PortEvent> {
        self.events[port.index()].take()
    }

    fn next_requester(&self, exclude: Option<usize>) -> Option<usize> {
        (0..PortId::COUNT)
            .map(|i| (self.rotate + i) % PortId::COUNT)
            .find(|&p| self.requests[p].is_some() && Some(p) != exclude)
    }

    /// Advance one clock: at most one memory access, delivered as a
    /// port event.
    pub fn tick(&mut self) {
        self.events = [None; PortId::COUNT];

        // A burst in progress keeps the grant until another port wants
        // the bus; preemption happens at the word boundary and the
        // preempted port re-requests the remainder.
        if let Some(burst) = self.burst {
            if self.next_requester(Some(burst.port)).is_none() {
                self.stream_burst_word(burst);
                return;
            }
            self.events[burst.port] = Some(PortEvent::BurstPreempted);
            self.requests[burst.port] = None;
            self.burst = None;
            self.rotate = (burst.port + 1) % PortId::COUNT;
        }

        let Some(port) = self.next_requester(None) else {
            return;
        };
        match self.requests[port] {
            Some(MemRequest::ReadWord { addr }) => {
                self.events[port] = Some(PortEvent::ReadData(self.mem.read(addr)));
                self.requests[port] = None;
                self.rotate = (port + 1) % PortId::COUNT;
            }
            Some(MemRequest::WriteWord { addr, data }) => {
                self.mem.write(addr, data);
                self.events[port] = Some(PortEvent::WriteDone);
                self.requests[port] = None;
                self.rotate = (port + 1) % PortId::COUNT;
            }
            Some(MemRequest::ReadBurst { addr, len }) => {
                if len == 0 {
                    self.requests[port] = None;
                    self.rotate = (port + 1) % PortId::COUNT;
                    return;
                }
                self.stream_burst_word(Burst {
                    port,
                    addr,
                    remaining: len,
                });
            }
            None => {}
        }
    }

    fn stream_burst_word(&mut self, burst: Burst) {
        self.events[burst.port] = Some(PortEvent::BurstData(self.mem.read(burst.addr)));
        if burst.remaining > 1 {
            self.burst = Some(Burst {
                port: burst.port,
                addr: burst.addr + 1,
                remaining: burst.remaining - 1,
            });
        } else {
            self.burst = None;
            self.requests[burst.port] = None;
            self.rotate = (burst.port + 1) % PortId::COUNT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut mem = Memory::with_words(64);
        mem.write(3, 0xBEEF);
        assert_eq!(mem.read(3), 0xBEEF);
    }

    #[test]
    fn out_of_range_reads_zero() {
        let mem = Memory::with_words(4);
        assert_eq!(mem.read(1000), 0);
    }

    #[test]
    fn upload_bytes_little_endian() {
        let mut mem = Memory::with_words(4);
        mem.upload_bytes(0, &[0x34, 0x12, 0x78, 0x56]);
        assert_eq!(mem.read(0), 0x1234);
        assert_eq!(mem.read(1), 0x5678);
    }

    #[test]
    fn single_word_read_completes_in_grant_cycle() {
        let mut arb = Arbiter::new(Memory::with_words(16));
        arb.mem.write(5, 42);
        arb.request(PortId::ZRead, MemRequest::ReadWord { addr: 5 });
        arb.tick();
        assert_eq!(arb.take_event(PortId::ZRead), Some(PortEvent::ReadData(42)));
        assert!(!arb.pending(PortId::ZRead));
    }

    #[test]
    fn write_acknowledged() {
        let mut arb = Arbiter::new(Memory::with_words(16));
        arb.request(PortId::ColorWrite, MemRequest::WriteWord { addr: 7, data: 9 });
        arb.tick();
        assert_eq!(arb.take_event(PortId::ColorWrite), Some(PortEvent::WriteDone));
        assert_eq!(arb.mem.read(7), 9);
    }
}
