//! Decoded texture block cache.
//!
//! One instance per sampler: 64 sets by 4 ways, each line holding one
//! decompressed 4x4 block as 16 canonical texels spread over four
//! parity-interleaved banks. Hits are combinational and return the
//! aligned 2x2 quad containing the requested texel. Misses run a
//! burst-fill FSM: fetch the raw block over the sampler's arbiter port,
//! decode it, write the banks over four cycles, then pulse completion so
//! the caller retries (and hits).

use ember_registers::components::tex_format_e::TexFormatE;
use ember_tex_decoder::decode_block;
use ember_twin_core::mem::{MemRequest, PortEvent};
use ember_twin_core::tiled::{burst_words, texture_block_word_addr};
use ember_twin_core::Texel;

pub const SETS: usize = 64;
pub const WAYS: usize = 4;

/// Line tag: texture base plus block coordinates. Full-width so the XOR
/// set fold can never alias two distinct blocks onto one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockKey {
    pub base_512: u16,
    pub block_x: u16,
    pub block_y: u16,
}

/// Set index: XOR fold of the low 6 bits of both block coordinates.
///
/// Keeps vertically adjacent block rows of one column out of each
/// other's sets; a pure indexing choice that leaves fetch addresses
/// untouched.
#[must_use]
pub const fn set_index(key: BlockKey) -> usize {
    ((key.block_x ^ key.block_y) & 0x3F) as usize
}

/// The aligned 2x2 texel quad of one cache hit, indexed by coordinate
/// parity (even/odd X by even/odd Y banks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexelQuad {
    texels: [[Texel; 2]; 2],
}

impl TexelQuad {
    /// The texel at the given coordinates (nearest-neighbor select).
    #[must_use]
    pub const fn select(&self, tx: u16, ty: u16) -> Texel {
        self.texels[(ty & 1) as usize][(tx & 1) as usize]
    }
}

/// 3-bit binary-tree pseudo-LRU per set.
///
/// Bit 0 points at the less-recently-used way pair ({0,1} when clear),
/// bits 1 and 2 at the LRU way inside the low and high pair.
mod plru {
    pub fn victim(state: u8) -> usize {
        if state & 0b001 == 0 {
            if state & 0b010 == 0 {
                0
            } else {
                1
            }
        } else if state & 0b100 == 0 {
            2
        } else {
            3
        }
    }

    /// Re-point the tree away from an accessed way.
    pub fn touch(state: u8, way: usize) -> u8 {
        match way {
            0 => state | 0b011,
            1 => (state | 0b001) & !0b010,
            2 => (state & !0b001) | 0b100,
            _ => state & !0b101,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct WayTag {
    key: BlockKey,
    valid: bool,
}

/// An in-flight fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fill {
    key: BlockKey,
    format: TexFormatE,
    width_log2: u8,
    way: usize,
    /// Burst length in words for this format.
    total: u16,
    /// Words received so far; also the resume offset after preemption.
    received: u16,
    bytes: [u8; 64],
    texels: [Texel; 16],
}

impl Fill {
    fn word_addr(&self) -> u32 {
        texture_block_word_addr(
            self.key.base_512,
            self.format,
            self.width_log2,
            self.key.block_x,
            self.key.block_y,
        ) + u32::from(self.received)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillState {
    Idle,
    /// Streaming burst words from the arbiter.
    Fetch(Fill),
    /// Writing decoded texels into the banks, one quad slot per cycle.
    BankWrite { fill: Fill, cycle: u8 },
    /// One-cycle completion pulse; the blocked lookup retries now.
    Done,
}

/// The per-sampler L1 cache.
pub struct TexCache {
    tags: [[WayTag; WAYS]; SETS],
    plru: [u8; SETS],
    /// Texel storage: [bank][set][way][quad slot], banks interleaved by
    /// (x&1, y&1), slots by (x>>1, y>>1) within the block.
    banks: [[[[Texel; 4]; WAYS]; SETS]; 4],
    state: FillState,
}

impl Default for TexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TexCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: [[WayTag::default(); WAYS]; SETS],
            plru: [0; SETS],
            banks: [[[[Texel::TRANSPARENT_BLACK; 4]; WAYS]; SETS]; 4],
            state: FillState::Idle,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, FillState::Idle)
    }

    /// True for exactly one cycle after a fill commits.
    #[must_use]
    pub fn fill_done(&self) -> bool {
        matches!(self.state, FillState::Done)
    }

    /// Combinational lookup. On a hit, returns the aligned quad for the
    /// texel coordinates and refreshes the replacement state.
    pub fn lookup(&mut self, key: BlockKey, tx: u16, ty: u16) -> Option<TexelQuad> {
        let set = set_index(key);
        let way = self.find_way(set, key)?;
        self.plru[set] = plru::touch(self.plru[set], way);
        let slot = (((ty & 3) >> 1) * 2 + ((tx & 3) >> 1)) as usize;
        let texel = |yp: usize, xp: usize| self.banks[yp * 2 + xp][set][way][slot];
        Some(TexelQuad {
            texels: [[texel(0, 0), texel(0, 1)], [texel(1, 0), texel(1, 1)]],
        })
    }

    fn find_way(&self, set: usize, key: BlockKey) -> Option<usize> {
        (0..WAYS).find(|&w| self.tags[set][w].valid && self.tags[set][w].key == key)
    }

    /// Begin a miss fill. The cache must be idle; the victim way is
    /// chosen now (first invalid way, else pseudo-LRU).
    pub fn start_fill(&mut self, key: BlockKey, format: TexFormatE, width_log2: u8) {
        debug_assert!(self.is_idle());
        let set = set_index(key);
        let way = (0..WAYS)
            .find(|&w| !self.tags[set][w].valid)
            .unwrap_or_else(|| plru::victim(self.plru[set]));
        self.state = FillState::Fetch(Fill {
            key,
            format,
            width_log2,
            way,
            total: burst_words(format),
            received: 0,
            bytes: [0; 64],
            texels: [Texel::TRANSPARENT_BLACK; 16],
        });
    }

    /// The burst the cache wants on its arbiter port this cycle. After a
    /// preemption this is automatically the shorter resume burst
    /// starting at the first unreceived word.
    #[must_use]
    pub fn mem_request(&self) -> Option<MemRequest> {
        match &self.state {
            FillState::Fetch(fill) => Some(MemRequest::ReadBurst {
                addr: fill.word_addr(),
                len: fill.total - fill.received,
            }),
            _ => None,
        }
    }

    /// Deliver one arbiter port event.
    pub fn port_event(&mut self, event: PortEvent) {
        let FillState::Fetch(mut fill) = self.state else {
            return;
        };
        match event {
            PortEvent::BurstData(word) => {
                let at = usize::from(fill.received) * 2;
                fill.bytes[at] = word as u8;
                fill.bytes[at + 1] = (word >> 8) as u8;
                fill.received += 1;
                if fill.received == fill.total {
                    fill.texels = decode_block(fill.format, &fill.bytes);
                    self.state = FillState::BankWrite { fill, cycle: 0 };
                } else {
                    self.state = FillState::Fetch(fill);
                }
            }
            // Preemption just drops the grant; the held request state
            // already points at the remainder.
            PortEvent::BurstPreempted => {}
            PortEvent::ReadData(_) | PortEvent::WriteDone => {}
        }
    }

    /// Advance the bank-write/completion stages one cycle.
    pub fn tick(&mut self) {
        match self.state {
            FillState::BankWrite { fill, cycle } => {
                let set = set_index(fill.key);
                let slot = usize::from(cycle);
                let base_x = (slot & 1) * 2;
                let base_y = (slot >> 1) * 2;
                for yp in 0..2 {
                    for xp in 0..2 {
                        let i = (base_y + yp) * 4 + base_x + xp;
                        self.banks[yp * 2 + xp][set][fill.way][slot] = fill.texels[i];
                    }
                }
                if cycle == 3 {
                    self.tags[set][fill.way] = WayTag {
                        key: fill.key,
                        valid: true,
                    };
                    self.plru[set] = plru::touch(self.plru[set], fill.way);
                    self.state = FillState::Done;
                } else {
                    self.state = FillState::BankWrite {
                        fill,
                        cycle: cycle + 1,
                    };
                }
            }
            FillState::Done => self.state = FillState::Idle,
            FillState::Idle | FillState::Fetch(_) => {}
        }
    }

    /// Clear every valid bit (any TEXn_CFG rewrite).
    pub fn invalidate(&mut self) {
        for set in &mut self.tags {
            for way in set {
                way.valid = false;
            }
        }
    }
}
