//! Memory-port request/event vocabulary.
//!
//! Every pipeline client reaches shared memory through one arbiter port
//! with at most one outstanding request. Single-word requests complete
//! in one grant; burst reads stream one word per granted cycle and may
//! be preempted at word boundaries, in which case the client re-issues
//! a shorter burst for the remainder.

/// Arbiter port identifiers, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum PortId {
    ZRead = 0,
    ZWrite = 1,
    ColorRead = 2,
    ColorWrite = 3,
    Tex0Fill = 4,
    Tex1Fill = 5,
}

impl PortId {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::ZRead,
        Self::ZWrite,
        Self::ColorRead,
        Self::ColorWrite,
        Self::Tex0Fill,
        Self::Tex1Fill,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A request posted on a port. Held until the arbiter completes or
/// preempts it; the poster must not mutate it while pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemRequest {
    ReadWord { addr: u32 },
    WriteWord { addr: u32, data: u16 },
    /// Burst read of `len` consecutive words starting at `addr`.
    ReadBurst { addr: u32, len: u16 },
}

/// A per-cycle completion event delivered back on a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    /// Single-word read data; the request is complete.
    ReadData(u16),
    /// Single-word write accepted; the request is complete.
    WriteDone,
    /// One word of a burst in flight.
    BurstData(u16),
    /// The burst lost the grant at a word boundary; the remainder must
    /// be re-requested.
    BurstPreempted,
}
