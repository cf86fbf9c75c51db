//! Property-based tests for the codec round-trip and merge guarantees

mod roundtrip;
