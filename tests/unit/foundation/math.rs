use super::*;

#[test]
fn fnv_matches_reference_vector() {
    // FNV-1a 64 of "a".
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(1.0);
    a.write_f64(2.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(2.0);
    b.write_f64(1.0);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn signed_zero_hashes_equal() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_eq!(a.finish(), b.finish());
}
