//! Fixed public constants: size budgets and the eight domain-separation
//! tags used throughout the transcript PRNG and the hash-to-challenge
//! machinery. All of these are compile-time constants; there is no mutable
//! global state anywhere in the crate.

pub const WINDOW_SIZE: usize = 6;
pub const TABLEN: usize = 1 << (WINDOW_SIZE - 2);
pub const MAX_COMB_SIZE: usize = 512;

pub const CHAL_BITS: usize = 128;
pub const ELL_BITS: usize = 136;
pub const EXP_BITS: usize = 2048;

pub const MIN_RSA_BITS: usize = 1024;
pub const MAX_RSA_BITS: usize = 4096;

pub const DEFAULT_G: u64 = 2;
pub const DEFAULT_H: u64 = 3;

/// Auxiliary generators used only inside the signature protocol's
/// cross-term bindings (`w^2`, `s1*w`, `s1*a`); unlike `g`/`h` these are
/// not part of a group handle and are never comb-precomputed.
pub const DEFAULT_K: u64 = 5;
pub const DEFAULT_M: u64 = 7;

pub const ELLDIFF_MAX: u32 = 512;

pub const MIN_RSA_BYTES: usize = (MIN_RSA_BITS + 7) / 8;
pub const MAX_RSA_BYTES: usize = (MAX_RSA_BITS + 7) / 8;
pub const CHAL_BYTES: usize = (CHAL_BITS + 7) / 8;
pub const ELL_BYTES: usize = (ELL_BITS + 7) / 8;

/// A fixed 32-byte domain-separation tag, `SHA256(ascii_label)` precomputed
/// at authoring time the same way a cached group hash is precomputed per
/// handle: the value never changes, so there is no reason to hash the
/// label at runtime.
pub type Tag = [u8; 32];

/// `SHA256("Goo Signature")`
pub const TAG_PREFIX: Tag = [
    0xc8, 0x30, 0xd5, 0xfd, 0xdc, 0xb2, 0x23, 0xcd, 0x86, 0x00, 0x7a, 0xbf, 0x91, 0xc4, 0x40, 0x27,
    0x6b, 0x00, 0x80, 0x66, 0xbc, 0xb6, 0x45, 0x91, 0xef, 0x80, 0x61, 0xc8, 0x9c, 0x1c, 0x58, 0x82,
];

/// `SHA256("Goo Expand")`
pub const TAG_EXPAND: Tag = [
    0x21, 0xa2, 0x7e, 0xd5, 0xef, 0xc0, 0x95, 0x45, 0x0b, 0x7b, 0x4d, 0xdb, 0x61, 0x30, 0x49, 0x1f,
    0x24, 0x17, 0xec, 0x25, 0x8e, 0xb2, 0xf4, 0xb7, 0xb2, 0xa6, 0xa9, 0x36, 0xf7, 0xcf, 0xec, 0xfb,
];

/// `SHA256("Goo Derive")`
pub const TAG_DERIVE: Tag = [
    0x99, 0x89, 0x61, 0x8e, 0x45, 0x0e, 0x09, 0xfb, 0xed, 0x0b, 0xc9, 0x51, 0xa3, 0xb3, 0x09, 0xa9,
    0xb5, 0xd2, 0xba, 0xe3, 0xdb, 0x76, 0x96, 0xb7, 0x6a, 0x89, 0x42, 0x81, 0xe5, 0x65, 0x34, 0xaf,
];

/// `SHA256("Goo Primality")`
pub const TAG_PRIMALITY: Tag = [
    0xf3, 0x31, 0x84, 0xc5, 0x6d, 0x6c, 0xc4, 0xf6, 0x0e, 0x39, 0x62, 0xa3, 0xad, 0xa4, 0xef, 0x03,
    0x97, 0xa6, 0xd6, 0x0f, 0x14, 0xc1, 0xc3, 0xa6, 0xd8, 0xa1, 0xe6, 0x7e, 0xb4, 0x33, 0x48, 0x55,
];

/// `SHA256("Goo Sign")`
pub const TAG_SIGN: Tag = [
    0x22, 0xe6, 0x4a, 0x95, 0x3d, 0x87, 0x74, 0x2d, 0x7c, 0xe6, 0xdd, 0x66, 0x3d, 0x4c, 0xea, 0xf3,
    0x55, 0xce, 0xa1, 0x74, 0x6a, 0xb8, 0x12, 0x20, 0x66, 0x68, 0xa1, 0xb2, 0xf1, 0xe3, 0x2d, 0xb3,
];

/// `SHA256("Goo Encrypt")`
pub const TAG_ENCRYPT: Tag = [
    0xc5, 0xba, 0xf3, 0x82, 0xd5, 0xf1, 0xee, 0x45, 0xbc, 0xab, 0xab, 0x07, 0xdb, 0xd8, 0xee, 0x7d,
    0x85, 0xed, 0x78, 0x68, 0x61, 0xd4, 0x21, 0xc7, 0xc2, 0xfb, 0x55, 0x90, 0xf0, 0x85, 0x61, 0xb4,
];

/// `SHA256("Goo Decrypt")`
pub const TAG_DECRYPT: Tag = [
    0x19, 0x03, 0x6b, 0xc4, 0x38, 0xd5, 0x8c, 0x14, 0x34, 0x5c, 0x41, 0x94, 0xc5, 0x24, 0x7f, 0xf9,
    0xcf, 0x27, 0xc7, 0xef, 0x47, 0xe6, 0xf4, 0xc3, 0xf4, 0x1a, 0x01, 0xc7, 0x8d, 0x58, 0x3e, 0xe7,
];

/// `SHA256("Goo Local")`
pub const TAG_LOCAL: Tag = [
    0x21, 0x15, 0x7f, 0x0d, 0xbe, 0x3e, 0x90, 0x38, 0xde, 0xa5, 0xd7, 0xdb, 0xf9, 0x28, 0x90, 0x01,
    0xe5, 0x5a, 0xa5, 0x75, 0xd2, 0xb3, 0x10, 0x67, 0x5d, 0x34, 0x34, 0x51, 0x40, 0xad, 0x68, 0x8e,
];

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn tag_of(label: &str) -> Tag {
        Sha256::digest(label.as_bytes()).into()
    }

    #[test]
    fn tags_match_their_ascii_labels() {
        assert_eq!(TAG_PREFIX, tag_of("Goo Signature"));
        assert_eq!(TAG_EXPAND, tag_of("Goo Expand"));
        assert_eq!(TAG_DERIVE, tag_of("Goo Derive"));
        assert_eq!(TAG_PRIMALITY, tag_of("Goo Primality"));
        assert_eq!(TAG_SIGN, tag_of("Goo Sign"));
        assert_eq!(TAG_ENCRYPT, tag_of("Goo Encrypt"));
        assert_eq!(TAG_DECRYPT, tag_of("Goo Decrypt"));
        assert_eq!(TAG_LOCAL, tag_of("Goo Local"));
    }
}
