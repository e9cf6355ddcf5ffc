//! Command identity hashing.
//!
//! Commands are matched by a seeded 32-bit MurmurHash3 (x86_32 variant) of
//! their name. The function is `const`, so identities of well-known commands
//! can be computed at compile time.

/// Seed used for every command identity.
pub const HASH_SEED: u32 = 0x9747_B28C;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Identity hash of a command token.
pub const fn command_hash(token: &[u8]) -> u32 {
    murmur3_32(HASH_SEED, token)
}

/// MurmurHash3 x86_32 of `data`.
pub const fn murmur3_32(seed: u32, data: &[u8]) -> u32 {
    let len = data.len();
    let blocks = len / 4;
    let mut h = seed;

    let mut i = 0;
    while i < blocks {
        let o = i * 4;
        let k = u32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
        h ^= mix_k(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
        i += 1;
    }

    let tail = blocks * 4;
    let mut k: u32 = 0;
    let rem = len & 3;
    if rem >= 3 {
        k ^= (data[tail + 2] as u32) << 16;
    }
    if rem >= 2 {
        k ^= (data[tail + 1] as u32) << 8;
    }
    if rem >= 1 {
        k ^= data[tail] as u32;
        h ^= mix_k(k);
    }

    h ^= len as u32;
    fmix32(h)
}

const fn mix_k(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

const fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
