pub mod common;
use common::*;
use core::cmp::Reverse;
use ramify::partition::{self, Assignment, Branches, Instance, InstanceError};

fn searcher(instance: Instance) -> (Assignment, Branches) {
    let root = Assignment::root(instance);
    let branches = Branches::new(root.clone());
    (root, branches)
}

#[test]
fn parses_an_instance_with_comments_and_blanks() {
    let text = "# known optimum\n8\n\n# three parts\n3\n5\n4\n\n3\n";
    let instance = Instance::parse(text).unwrap();
    assert_eq!(instance.known(), Some(8));
    assert_eq!(instance.parts(), 3);
    assert_eq!(instance.sizes(), &[5, 4, 3]);
}

#[test]
fn minus_one_means_no_known_optimum() {
    let instance = Instance::parse("-1\n2\n4\n3\n").unwrap();
    assert_eq!(instance.known(), None);
}

#[test]
fn rejects_malformed_instances() {
    assert_eq!(Instance::parse(""), Err(InstanceError::MissingKnown));
    assert_eq!(Instance::parse("8\n"), Err(InstanceError::MissingParts));
    assert_eq!(Instance::parse("8\n3\n"), Err(InstanceError::MissingSizes));
    assert_eq!(
        Instance::parse("8\nthree\n4\n"),
        Err(InstanceError::Malformed("three".to_string()))
    );
    assert_eq!(Instance::parse("8\n1\n4\n"), Err(InstanceError::TooFewParts(1)));
    assert_eq!(Instance::parse("8\n2\n4\n0\n"), Err(InstanceError::ZeroSize));
    assert_eq!(Instance::parse("8\n2\n3\n4\n"), Err(InstanceError::Unsorted));
}

#[test]
fn ceiling_is_the_larger_of_average_and_largest_item() {
    let instance = Instance::new(3, vec![5, 4, 3, 3, 2, 2, 2, 1, 1]).unwrap();
    assert_eq!(instance.total(), 23);
    assert_eq!(instance.ceiling(), 8);

    let dominated = Instance::new(3, vec![20, 1, 1]).unwrap();
    assert_eq!(dominated.ceiling(), 20);
}

#[test]
fn equal_loads_collapse_to_a_single_child() {
    let instance = Instance::new(3, vec![5, 4]).unwrap();
    let root = Assignment::root(instance);
    assert_eq!(Branches::new(root.clone()).residual(), 1);

    let mut branches = Branches::new(root);
    let placed = branches.advance().unwrap();
    assert_eq!(placed.loads().iter().filter(|&&load| load > 0).count(), 1);
    // One empty part and one loaded part remain distinct.
    assert_eq!(Branches::new(placed).residual(), 2);
}

#[test]
fn children_are_ordered_lightest_part_first() {
    let instance = Instance::new(2, vec![4, 3, 2]).unwrap();
    let root = Assignment::root(instance);
    let mut branches = Branches::new(root);
    let first = branches.advance().unwrap();
    let mut second_level = Branches::new(first);
    let lighter = second_level.advance().unwrap();
    let heavier = second_level.advance().unwrap();
    assert!(lighter.tallest() <= heavier.tallest());
    assert_eq!(second_level.residual(), 0);
    assert!(second_level.advance().is_none());
}

#[test]
fn finds_the_known_optimum_and_short_circuits() {
    let instance = Instance::new(3, vec![5, 4, 3, 3, 2, 2, 2, 1, 1]).unwrap();
    let ceiling = instance.ceiling();
    let (root, branches) = searcher(instance);
    let mut search = Search::new(Recorder::new());
    let best = search
        .maximize_with(
            root,
            branches,
            Assignment::score,
            partition::prune,
            Some(Reverse(ceiling)),
            partition::render,
        )
        .unwrap();
    assert!(best.complete());
    assert_eq!(best.tallest(), 8);
    assert_eq!(best.loads().iter().sum::<u64>(), 23);
    assert_eq!(search.logger.count(Event::ShortCircuit), 1);
    let kinds = search.logger.kinds();
    assert_eq!(
        &kinds[kinds.len() - 2..],
        &[Event::ShortCircuit, Event::Terminate]
    );
}

#[test]
fn strengthens_through_decreasing_makespans() {
    // The greedy first descent lands on 11; the optimum of 10 takes work.
    let instance = Instance::new(2, vec![5, 5, 4, 3, 3]).unwrap();
    let ceiling = instance.ceiling();
    assert_eq!(ceiling, 10);
    let (root, branches) = searcher(instance);
    let mut search = Search::new(Recorder::new());
    let best = search
        .maximize_with(
            root,
            branches,
            Assignment::score,
            partition::prune,
            Some(Reverse(ceiling)),
            partition::render,
        )
        .unwrap();
    assert_eq!(best.tallest(), 10);
    let makespans: Vec<u64> = search
        .logger
        .objectives
        .iter()
        .map(|objective| objective.parse().unwrap())
        .collect();
    assert!(makespans.windows(2).all(|pair| pair[0] > pair[1]));
    assert_eq!(makespans.last(), Some(&10));
}

#[test]
fn decides_reachable_and_unreachable_makespans() {
    let instance = Instance::new(3, vec![5, 4, 3, 3, 2, 2, 2, 1, 1]).unwrap();
    let (root, branches) = searcher(instance.clone());
    let mut search = Search::new(Quiet::new());
    let found = search
        .decide_with(
            root,
            branches,
            Assignment::score,
            partition::prune,
            Reverse(8),
            partition::render,
        )
        .unwrap();
    assert_eq!(found.map(|node| node.tallest()), Some(8));

    let (root, branches) = searcher(instance);
    let missing = search
        .decide_with(
            root,
            branches,
            Assignment::score,
            partition::prune,
            Reverse(7),
            partition::render,
        )
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn a_single_item_still_yields_a_complete_partition() {
    let instance = Instance::new(2, vec![3]).unwrap();
    let ceiling = instance.ceiling();
    let (root, branches) = searcher(instance);
    let mut search = Search::new(Quiet::new());
    let best = search
        .maximize_with(
            root,
            branches,
            Assignment::score,
            partition::prune,
            Some(Reverse(ceiling)),
            partition::render,
        )
        .unwrap();
    assert!(best.complete());
    assert_eq!(best.tallest(), 3);
}

#[test]
fn partition_searches_are_deterministic() {
    let text = "8\n3\n5\n4\n3\n3\n2\n2\n2\n1\n1\n";
    let mut runs = Vec::new();
    for _ in 0..2 {
        let instance = Instance::parse(text).unwrap();
        let (root, branches) = searcher(instance);
        let mut search = Search::new(Recorder::new());
        search
            .maximize_with(
                root,
                branches,
                Assignment::score,
                partition::prune,
                None,
                partition::render,
            )
            .unwrap();
        runs.push((search.logger.events.clone(), search.logger.objectives.clone()));
    }
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn displays_parts_with_their_loads() {
    let instance = Instance::new(2, vec![4, 3, 2]).unwrap();
    let root = Assignment::root(instance);
    let mut branches = Branches::new(root);
    let a = branches.advance().unwrap();
    let mut below = Branches::new(a);
    let b = below.advance().unwrap();
    let done = Branches::new(b.clone()).advance().unwrap();
    assert!(done.complete());
    let rendered = done.to_string();
    assert!(rendered.contains("]="));
    assert_eq!(rendered.matches('[').count(), 2);
}
