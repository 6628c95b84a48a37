//! Group laws over a deterministic random corpus.
//!
//! Fast CI mode: default seeds and budget when `CI` is set.
//! Extended local mode: set `DOCGROUP_LAW_SEEDS` and `DOCGROUP_LAW_BUDGET`
//! (maximum nodes per generated tree) to increase coverage.

use docgroup::tree;
use docgroup::{AbelianGroup, AttributeSet, Tag, Text};
use markup::{Document, Element, NodeId};
use markup_test_support::corpus::{CorpusOptions, random_element, random_tree};
use markup_test_support::rng::{LcgRng, SEED_MIX, env_knob};
use markup_test_support::snapshot::tree_snapshot;
use markup_test_support::diff_lines;
use std::fmt::Debug;

const DEFAULT_SEEDS_CI: usize = 40;
const DEFAULT_SEEDS_LOCAL: usize = 200;
const DEFAULT_BUDGET_CI: usize = 24;
const DEFAULT_BUDGET_LOCAL: usize = 64;

fn seed_count() -> usize {
    env_knob("DOCGROUP_LAW_SEEDS", DEFAULT_SEEDS_CI, DEFAULT_SEEDS_LOCAL)
}

fn options() -> CorpusOptions {
    CorpusOptions {
        max_nodes: env_knob("DOCGROUP_LAW_BUDGET", DEFAULT_BUDGET_CI, DEFAULT_BUDGET_LOCAL),
        ..CorpusOptions::default()
    }
}

/// Random trees as generated, trailing unit nodes and layout characters
/// included.
fn corpus<const N: usize>(law: u64, seed: usize) -> (u64, [Document; N]) {
    let seed = (seed as u64).wrapping_mul(SEED_MIX) ^ law;
    let mut rng = LcgRng::new(seed);
    let options = options();
    let trees = std::array::from_fn(|_| random_tree(&mut rng, &options));
    (seed, trees)
}

fn unit_tree() -> Document {
    Document::new(Element::new("_"))
}

fn with_trailing_unit(doc: &Document) -> Document {
    let mut padded = doc.clone();
    let root = padded.root();
    padded.append_child(root, Element::new("_"));
    padded
}

fn with_layout_as_spaces(doc: &Document) -> Document {
    let mut spaced = doc.clone();
    let space = |text: &mut Option<String>| {
        if let Some(text) = text {
            *text = text.replace(['\n', '\r', '\t'], " ");
        }
    };
    let ids: Vec<NodeId> = spaced.descendants(spaced.root()).collect();
    for id in ids {
        let element = spaced.element_mut(id);
        space(&mut element.text);
        space(&mut element.tail);
    }
    spaced
}

fn assert_trees_equal(expected: &Document, actual: &Document, context: &str) {
    if !tree::equal(expected, actual) {
        panic!(
            "{context}\nexpected: {}\n  actual: {}\n{}",
            expected.to_xml(),
            actual.to_xml(),
            diff_lines(&tree_snapshot(expected), &tree_snapshot(actual))
        );
    }
}

#[test]
fn tree_addition_commutes() {
    for i in 0..seed_count() {
        let (seed, [a, b]) = corpus::<2>(0x636f6d6d, i);
        let ab = tree::add(a.clone(), &b).unwrap();
        let ba = tree::add(b, &a).unwrap();
        assert_trees_equal(&ab, &ba, &format!("commutativity, seed {seed:#x}"));
    }
}

#[test]
fn tree_addition_is_associative() {
    for i in 0..seed_count() {
        let (seed, [a, b, c]) = corpus::<3>(0x6173736f, i);
        let left = tree::add(tree::add(a.clone(), &b).unwrap(), &c).unwrap();
        let bc = tree::add(b, &c).unwrap();
        let right = tree::add(a, &bc).unwrap();
        assert_trees_equal(&left, &right, &format!("associativity, seed {seed:#x}"));
    }
}

#[test]
fn unit_tree_is_neutral_on_both_sides() {
    for i in 0..seed_count() {
        let (seed, [a]) = corpus::<1>(0x756e6974, i);
        let right = tree::add(a.clone(), &unit_tree()).unwrap();
        assert_trees_equal(&a, &right, &format!("a + e, seed {seed:#x}"));
        let left = tree::add(unit_tree(), &a).unwrap();
        assert_trees_equal(&a, &left, &format!("e + a, seed {seed:#x}"));
    }
}

#[test]
fn tree_plus_inverse_is_the_unit_tree() {
    for i in 0..seed_count() {
        let (seed, [a]) = corpus::<1>(0x696e7665, i);
        let inverse = tree::invert(a.clone()).unwrap();
        let sum = tree::add(inverse, &a).unwrap();
        assert_trees_equal(&unit_tree(), &sum, &format!("-a + a, seed {seed:#x}"));
        assert_eq!(tree::count_non_unit_nodes(&sum), 1, "seed {seed:#x}");

        let twice = tree::invert(tree::invert(a.clone()).unwrap()).unwrap();
        assert_trees_equal(&a, &twice, &format!("--a, seed {seed:#x}"));
    }
}

#[test]
fn metric_axioms() {
    for i in 0..seed_count() {
        let (seed, [a, b, c]) = corpus::<3>(0x6d657472, i);
        let d = |x: &Document, y: &Document| tree::metric(x, y).unwrap();
        assert_eq!(d(&a, &a), 0, "identity of indiscernibles, seed {seed:#x}");
        assert_eq!(d(&a, &b), d(&b, &a), "symmetry, seed {seed:#x}");
        assert!(
            d(&a, &c) <= d(&a, &b) + d(&b, &c),
            "triangle inequality, seed {seed:#x}"
        );
        assert_eq!(
            d(&a, &b) == 0,
            tree::equal(&a, &b),
            "metric zero iff equal, seed {seed:#x}"
        );

        for (label, variant) in [
            ("trailing unit", with_trailing_unit(&a)),
            ("layout as spaces", with_layout_as_spaces(&a)),
            ("a + e", tree::add(a.clone(), &unit_tree()).unwrap()),
        ] {
            assert_eq!(d(&a, &variant), 0, "{label}, seed {seed:#x}");
            assert!(tree::equal(&a, &variant), "{label}, seed {seed:#x}");
        }
    }
}

fn check_laws<G: AbelianGroup + Clone + Debug>(a: &G, b: &G, c: &G, context: &str) {
    let same = |x: &G, y: &G| x.try_sub(y).unwrap().is_identity();
    let ab = a.try_add(b).unwrap();
    assert!(same(&ab, &b.try_add(a).unwrap()), "{context}: {a:?} + {b:?}");

    let left = ab.try_add(c).unwrap();
    let right = a.try_add(&b.try_add(c).unwrap()).unwrap();
    assert!(same(&left, &right), "{context}: ({a:?} + {b:?}) + {c:?}");

    assert!(same(&a.try_add(&G::identity()).unwrap(), a), "{context}: {a:?} + e");
    assert!(
        a.try_add(&a.try_invert().unwrap()).unwrap().is_identity(),
        "{context}: {a:?} - {a:?}"
    );
}

#[test]
fn component_groups_satisfy_the_laws() {
    for i in 0..seed_count() {
        let seed = (i as u64).wrapping_mul(SEED_MIX) ^ 0x636f6d70;
        let mut rng = LcgRng::new(seed);
        let [a, b, c]: [Element; 3] = std::array::from_fn(|_| random_element(&mut rng, 1));
        let context = format!("seed {seed:#x}");

        check_laws(
            &Tag(a.name.clone()),
            &Tag(b.name.clone()),
            &Tag(c.name.clone()),
            &context,
        );
        check_laws(
            &Text(a.text.clone()),
            &Text(b.text.clone()),
            &Text(c.text.clone()),
            &context,
        );
        check_laws(
            &AttributeSet(a.attributes.clone()),
            &AttributeSet(b.attributes.clone()),
            &AttributeSet(c.attributes.clone()),
            &context,
        );
        check_laws(&a, &b, &c, &context);
    }
}
