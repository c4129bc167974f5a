use super::*;
use crate::foundation::core::{Size, Vec2};

struct Rng64(u64);

impl Rng64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

fn leaf(i: u64) -> RenderingContext {
    match i % 3 {
        0 => RenderingContext::Position(Vec2::new(i as f64, 0.0).into()),
        1 => RenderingContext::Opacity((1.0 / (i as f64 + 1.0)).into()),
        _ => RenderingContext::TimeOffset(i as f64),
    }
}

/// Random nesting of composites and nulls, plus the leaves in order.
fn random_tree(rng: &mut Rng64, depth: u32, next: &mut u64, leaves: &mut Vec<RenderingContext>) -> RenderingContext {
    if depth == 0 || rng.below(3) == 0 {
        if rng.below(5) == 0 {
            return RenderingContext::Null;
        }
        let node = leaf(*next);
        *next += 1;
        leaves.push(node.clone());
        return node;
    }
    let n = rng.below(4);
    let items: Vec<_> = (0..n)
        .map(|_| random_tree(rng, depth - 1, next, leaves))
        .collect();
    // Build an unflattened composite directly so compose has real nesting to remove.
    if items.len() >= 2 {
        RenderingContext::Composite(items.into())
    } else {
        RenderingContext::compose(items)
    }
}

#[test]
fn compose_flattens_random_nesting() {
    let mut rng = Rng64(7);
    for _ in 0..200 {
        let mut next = 0;
        let mut leaves = Vec::new();
        let tree = random_tree(&mut rng, 4, &mut next, &mut leaves);
        let flat = RenderingContext::compose([tree]);

        assert!(flat.children().iter().all(|c| !c.is(ContextKind::Composite)));
        assert!(flat.children().iter().all(|c| !c.is_null()));
        assert_eq!(flat.children(), leaves.as_slice());
        match leaves.len() {
            0 => assert!(flat.is_null()),
            1 => assert_eq!(flat, leaves[0]),
            _ => assert!(flat.is(ContextKind::Composite)),
        }
    }
}

#[test]
fn compose_is_associative() {
    let a = leaf(0);
    let b = leaf(1);
    let c = leaf(2);
    assert_eq!((a.clone() + b.clone()) + c.clone(), a.clone() + (b.clone() + c.clone()));
    assert_eq!(RenderingContext::Null + a.clone(), a);
}

#[test]
fn filter_and_partition_keep_order() {
    let run = RenderingContext::compose((0..6).map(leaf));
    let (positions, rest) = run.partition(ContextKind::Position);
    assert_eq!(positions.children(), &[leaf(0), leaf(3)]);
    assert_eq!(rest.children(), &[leaf(1), leaf(2), leaf(4), leaf(5)]);

    let kept = run.filter(ContextKind::Position, |c| c == &leaf(3));
    assert_eq!(kept.count(ContextKind::Position), 1);
    assert_eq!(kept.len(), 5);
    assert!(!run.without(ContextKind::TimeOffset).contains(ContextKind::TimeOffset));
}

#[test]
fn move_to_start_and_end() {
    let run = RenderingContext::compose((0..6).map(leaf));
    let front = run.move_to_start(ContextKind::Opacity);
    assert_eq!(&front.children()[..2], &[leaf(1), leaf(4)]);
    let back = run.move_to_end(ContextKind::Opacity);
    assert_eq!(&back.children()[4..], &[leaf(1), leaf(4)]);
}

#[test]
fn empty_run_is_null() {
    let none = RenderingContext::compose(Vec::new());
    assert!(none.is_null());
    assert!(none.is_empty());
    assert_eq!(none.len(), 0);
    let clip = RenderingContext::Clip(Size::new(1.0, 1.0));
    assert_eq!(clip.without(ContextKind::Clip), RenderingContext::Null);
}
