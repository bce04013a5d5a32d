//! Arbiter fairness and burst semantics.

use ember_memory::{Arbiter, Memory};
use ember_twin_core::mem::{MemRequest, PortEvent, PortId};

fn arbiter() -> Arbiter {
    let mut mem = Memory::with_words(1024);
    for addr in 0..1024 {
        mem.write(addr, addr as u16);
    }
    Arbiter::new(mem)
}

#[test]
fn all_ports_granted_within_one_rotation() {
    let mut arb = arbiter();
    for port in PortId::ALL {
        arb.request(
            port,
            MemRequest::ReadWord {
                addr: port.index() as u32,
            },
        );
    }
    let mut granted = [false; PortId::COUNT];
    for _ in 0..PortId::COUNT {
        arb.tick();
        for port in PortId::ALL {
            if let Some(PortEvent::ReadData(data)) = arb.take_event(port) {
                assert_eq!(data, port.index() as u16);
                granted[port.index()] = true;
            }
        }
    }
    assert!(granted.iter().all(|&g| g));
}

#[test]
fn rotation_does_not_starve_under_continuous_load() {
    let mut arb = arbiter();
    let mut grants = [0u32; PortId::COUNT];
    for _ in 0..600 {
        // Every port re-requests as soon as its slot frees up.
        for port in PortId::ALL {
            if !arb.pending(port) {
                arb.request(port, MemRequest::ReadWord { addr: 1 });
            }
        }
        arb.tick();
        for port in PortId::ALL {
            if arb.take_event(port).is_some() {
                grants[port.index()] += 1;
            }
        }
    }
    // One grant per cycle, spread evenly: 100 each.
    for count in grants {
        assert_eq!(count, 100);
    }
}

#[test]
fn uncontended_burst_streams_to_completion() {
    let mut arb = arbiter();
    arb.request(PortId::Tex0Fill, MemRequest::ReadBurst { addr: 100, len: 4 });
    let mut data = Vec::new();
    for _ in 0..4 {
        arb.tick();
        match arb.take_event(PortId::Tex0Fill) {
            Some(PortEvent::BurstData(word)) => data.push(word),
            other => panic!("expected burst data, got {other:?}"),
        }
    }
    assert_eq!(data, vec![100, 101, 102, 103]);
    assert!(!arb.pending(PortId::Tex0Fill));
}

#[test]
fn burst_preempted_at_word_boundary_by_waiting_port() {
    let mut arb = arbiter();
    arb.request(PortId::Tex0Fill, MemRequest::ReadBurst { addr: 200, len: 8 });
    arb.tick();
    assert_eq!(
        arb.take_event(PortId::Tex0Fill),
        Some(PortEvent::BurstData(200))
    );

    // A single-word port shows up mid-burst.
    arb.request(PortId::ZRead, MemRequest::ReadWord { addr: 5 });
    arb.tick();
    assert_eq!(
        arb.take_event(PortId::Tex0Fill),
        Some(PortEvent::BurstPreempted)
    );
    assert_eq!(arb.take_event(PortId::ZRead), Some(PortEvent::ReadData(5)));
    assert!(!arb.pending(PortId::Tex0Fill));

    // The client re-requests the remainder and the stream resumes with
    // no duplication or loss.
    arb.request(PortId::Tex0Fill, MemRequest::ReadBurst { addr: 201, len: 7 });
    let mut data = Vec::new();
    while arb.pending(PortId::Tex0Fill) {
        arb.tick();
        if let Some(PortEvent::BurstData(word)) = arb.take_event(PortId::Tex0Fill) {
            data.push(word);
        }
    }
    assert_eq!(data, (201..208).collect::<Vec<u16>>());
}

#[test]
fn competing_bursts_both_make_progress() {
    let mut arb = arbiter();
    let mut got = [Vec::new(), Vec::new()];
    let mut next = [(300u32, 8u16), (400u32, 8u16)];
    for _ in 0..200 {
        for (i, port) in [PortId::Tex0Fill, PortId::Tex1Fill].into_iter().enumerate() {
            if !arb.pending(port) && next[i].1 > 0 {
                arb.request(
                    port,
                    MemRequest::ReadBurst {
                        addr: next[i].0,
                        len: next[i].1,
                    },
                );
            }
        }
        arb.tick();
        for (i, port) in [PortId::Tex0Fill, PortId::Tex1Fill].into_iter().enumerate() {
            match arb.take_event(port) {
                Some(PortEvent::BurstData(word)) => {
                    got[i].push(word);
                    next[i].0 += 1;
                    next[i].1 -= 1;
                }
                Some(PortEvent::BurstPreempted) | None => {}
                other => panic!("unexpected event {other:?}"),
            }
        }
        if next[0].1 == 0 && next[1].1 == 0 {
            break;
        }
    }
    assert_eq!(got[0], (300..308).collect::<Vec<u16>>());
    assert_eq!(got[1], (400..408).collect::<Vec<u16>>());
}
