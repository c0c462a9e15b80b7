// smarttag/src/crypto/aes.rs

//! AES-128 block cipher (FIPS-197).
//!
//! State bytes are kept column-major: byte `4 * c + r` is row `r` of column
//! `c`, which is also the order of the 16 input bytes.

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

const ROUNDS: usize = 10;

/// Multiply by x in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
const fn xtime(a: u8) -> u8 {
    (a << 1) ^ if a & 0x80 != 0 { 0x1b } else { 0x00 }
}

const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            p ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    p
}

/// S-box built by walking the multiplicative group with generator 3; `q`
/// tracks the inverse of `p` and the affine transform is applied to it.
const fn build_sbox() -> [u8; 256] {
    let mut sbox = [0u8; 256];
    let mut p: u8 = 1;
    let mut q: u8 = 1;
    loop {
        p = p ^ xtime(p);

        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        let affine = q
            ^ q.rotate_left(1)
            ^ q.rotate_left(2)
            ^ q.rotate_left(3)
            ^ q.rotate_left(4);
        sbox[p as usize] = affine ^ 0x63;

        if p == 1 {
            break;
        }
    }
    sbox[0] = 0x63;
    sbox
}

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[table[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

const SBOX: [u8; 256] = build_sbox();
const INV_SBOX: [u8; 256] = invert(&SBOX);

/// Expanded AES-128 key: 11 round keys of 16 bytes.
#[derive(Clone)]
pub struct Aes128 {
    round_keys: [[u8; BLOCK_LEN]; ROUNDS + 1],
}

impl Aes128 {
    pub fn new(key: &[u8; 16]) -> Self {
        let mut round_keys = [[0u8; BLOCK_LEN]; ROUNDS + 1];
        round_keys[0] = *key;

        let mut rcon = 0x01u8;
        for round in 1..=ROUNDS {
            let prev = round_keys[round - 1];
            // RotWord + SubWord of the last word, then Rcon
            let mut t = [prev[13], prev[14], prev[15], prev[12]];
            for b in t.iter_mut() {
                *b = SBOX[*b as usize];
            }
            t[0] ^= rcon;
            rcon = xtime(rcon);

            let mut next = [0u8; BLOCK_LEN];
            for i in 0..4 {
                next[i] = prev[i] ^ t[i];
            }
            for i in 4..BLOCK_LEN {
                next[i] = prev[i] ^ next[i - 4];
            }
            round_keys[round] = next;
        }

        Self { round_keys }
    }

    /// Encrypt one block in place.
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        add_round_key(block, &self.round_keys[0]);
        for round in 1..=ROUNDS {
            sub_bytes(block, &SBOX);
            shift_rows(block);
            if round != ROUNDS {
                mix_columns(block);
            }
            add_round_key(block, &self.round_keys[round]);
        }
    }

    /// Decrypt one block in place (inverse cipher).
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        add_round_key(block, &self.round_keys[ROUNDS]);
        for round in (0..ROUNDS).rev() {
            inv_shift_rows(block);
            sub_bytes(block, &INV_SBOX);
            add_round_key(block, &self.round_keys[round]);
            if round != 0 {
                inv_mix_columns(block);
            }
        }
    }
}

impl std::fmt::Debug for Aes128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Aes128(..)")
    }
}

fn add_round_key(state: &mut [u8; BLOCK_LEN], key: &[u8; BLOCK_LEN]) {
    for (s, k) in state.iter_mut().zip(key.iter()) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut [u8; BLOCK_LEN], table: &[u8; 256]) {
    for s in state.iter_mut() {
        *s = table[*s as usize];
    }
}

// Row r rotates left by r columns.
fn shift_rows(state: &mut [u8; BLOCK_LEN]) {
    let old = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = old[4 * ((c + r) % 4) + r];
        }
    }
}

fn inv_shift_rows(state: &mut [u8; BLOCK_LEN]) {
    let old = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * ((c + r) % 4) + r] = old[4 * c + r];
        }
    }
}

fn mix_columns(state: &mut [u8; BLOCK_LEN]) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        col[0] = xtime(a0) ^ (xtime(a1) ^ a1) ^ a2 ^ a3;
        col[1] = a0 ^ xtime(a1) ^ (xtime(a2) ^ a2) ^ a3;
        col[2] = a0 ^ a1 ^ xtime(a2) ^ (xtime(a3) ^ a3);
        col[3] = (xtime(a0) ^ a0) ^ a1 ^ a2 ^ xtime(a3);
    }
}

fn inv_mix_columns(state: &mut [u8; BLOCK_LEN]) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        col[0] = gmul(a0, 14) ^ gmul(a1, 11) ^ gmul(a2, 13) ^ gmul(a3, 9);
        col[1] = gmul(a0, 9) ^ gmul(a1, 14) ^ gmul(a2, 11) ^ gmul(a3, 13);
        col[2] = gmul(a0, 13) ^ gmul(a1, 9) ^ gmul(a2, 14) ^ gmul(a3, 11);
        col[3] = gmul(a0, 11) ^ gmul(a1, 13) ^ gmul(a2, 9) ^ gmul(a3, 14);
    }
}
