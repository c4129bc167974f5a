use super::*;

struct Rng64(u64);

impl Rng64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

fn random_window(rng: &mut Rng64) -> VisibilityWindow {
    let mut times: Vec<f64> = (0..40)
        .filter(|_| rng.next_u64() % 6 == 0)
        .map(f64::from)
        .collect();
    if rng.next_u64() % 8 == 0 {
        times.insert(0, f64::NEG_INFINITY);
    }
    times.truncate(5);
    VisibilityWindow::new(times).unwrap()
}

fn sample_frames() -> impl Iterator<Item = f64> {
    (-4..90).map(|i| f64::from(i) * 0.5)
}

#[test]
fn parity_gives_state() {
    let w = VisibilityWindow::new([0.0, 10.0, 20.0]).unwrap();
    assert!(!w.is_visible_at(-1.0));
    assert!(w.is_visible_at(0.0));
    assert!(w.is_visible_at(9.99));
    assert!(!w.is_visible_at(10.0));
    assert!(w.is_visible_at(1.0e9));
}

#[test]
fn never_and_always() {
    assert!(VisibilityWindow::never().is_never_visible());
    assert!(!VisibilityWindow::never().is_visible_at(0.0));
    let always = VisibilityWindow::always();
    assert!(always.is_always_visible());
    assert!(always.is_visible_at(-1.0e12));
    assert!(VisibilityWindow::between(5.0, 5.0).is_never_visible());
}

#[test]
fn rejects_unordered_changes() {
    assert!(VisibilityWindow::new([1.0, 1.0]).is_err());
    assert!(VisibilityWindow::new([2.0, 1.0]).is_err());
    assert!(VisibilityWindow::new([f64::NAN]).is_err());
}

#[test]
fn and_of_two_windows() {
    let a = VisibilityWindow::new([0.0, 10.0, 20.0, 30.0]).unwrap();
    let b = VisibilityWindow::new([5.0, 25.0]).unwrap();
    let both = VisibilityWindow::combine_and(&[a, b]);
    assert_eq!(both.state_changes(), &[5.0, 10.0, 20.0, 25.0]);
}

#[test]
fn and_with_touching_edges_has_no_zero_width_run() {
    let a = VisibilityWindow::between(0.0, 10.0);
    let b = VisibilityWindow::between(10.0, 20.0);
    assert!(VisibilityWindow::combine_and(&[a.clone(), b.clone()]).is_never_visible());
    assert_eq!(
        VisibilityWindow::combine_or(&[a, b]).state_changes(),
        &[0.0, 20.0]
    );
}

#[test]
fn and_of_nothing_is_always() {
    assert!(VisibilityWindow::combine_and(&[]).is_always_visible());
    assert!(VisibilityWindow::combine_or(&[]).is_never_visible());
}

#[test]
fn combinations_match_brute_force() {
    let mut rng = Rng64(0x5EED);
    for _ in 0..300 {
        let n = 1 + (rng.next_u64() % 4) as usize;
        let windows: Vec<_> = (0..n).map(|_| random_window(&mut rng)).collect();
        let and = VisibilityWindow::combine_and(&windows);
        let or = VisibilityWindow::combine_or(&windows);
        assert!(VisibilityWindow::new(and.state_changes().iter().copied()).is_ok());
        assert!(VisibilityWindow::new(or.state_changes().iter().copied()).is_ok());
        for f in sample_frames() {
            let all = windows.iter().all(|w| w.is_visible_at(f));
            let any = windows.iter().any(|w| w.is_visible_at(f));
            assert_eq!(and.is_visible_at(f), all, "and at {f} for {windows:?}");
            assert_eq!(or.is_visible_at(f), any, "or at {f} for {windows:?}");
        }
    }
}

#[test]
fn remap_keeps_infinities() {
    let w = VisibilityWindow::new([f64::NEG_INFINITY, 10.0]).unwrap();
    let mapped = w.remap_time(TimeMapping::new(5.0, 2.0).unwrap());
    assert_eq!(mapped.state_changes(), &[f64::NEG_INFINITY, 25.0]);
    assert_eq!(mapped.first_change(), Some(f64::NEG_INFINITY));
}
