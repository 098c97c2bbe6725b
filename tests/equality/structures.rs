//! Integration tests for structural equality

use numtower_equality::{
    Datum, EqualOutcome, Equivalence, RecordType, default_budget, equal_bounded, is_eq, is_equal,
    is_eqv,
};

fn int(i: i64) -> Datum {
    Datum::from(i)
}

fn pair_parts(d: &Datum) -> (Datum, Datum) {
    let Datum::Pair(p) = d else {
        panic!("expected a pair, got {d}");
    };
    (p.car(), p.cdr())
}

/// `#0=(a . #0#)`: a one-element circular list.
fn self_loop(value: Datum) -> Datum {
    let cell = Datum::cons(value, Datum::Nil);
    if let Datum::Pair(p) = &cell {
        p.set_cdr(cell.clone());
    }
    cell
}

fn break_loop(cell: &Datum) {
    if let Datum::Pair(p) = cell {
        p.set_cdr(Datum::Nil);
    }
}

// =============================================================================
// Acyclic structure
// =============================================================================

#[test]
fn nested_lists_and_vectors() {
    let build = || {
        Datum::list([
            int(1),
            Datum::vector([Datum::string("two"), Datum::list([int(3), Datum::from(4.5)])]),
            Datum::symbol("five"),
        ])
    };
    let (a, b) = (build(), build());
    assert!(is_equal(&a, &b));
    assert!(!is_eqv(&a, &b));
    assert!(!is_eq(&a, &b));
}

#[test]
fn improper_lists() {
    let a = Datum::cons(int(1), int(2));
    let b = Datum::cons(int(1), int(2));
    let c = Datum::cons(int(1), Datum::Nil);
    assert!(is_equal(&a, &b));
    assert!(!is_equal(&a, &c));
}

#[test]
fn mutation_is_visible_to_equal() {
    let a = Datum::list([int(1), int(2)]);
    let b = Datum::list([int(1), int(2)]);
    assert!(is_equal(&a, &b));
    let Datum::Pair(p) = &b else { unreachable!() };
    p.set_car(int(9));
    assert!(!is_equal(&a, &b));
}

#[test]
fn string_contents_are_compared() {
    let a = Datum::string("hello");
    let b = Datum::string("hello");
    assert!(is_equal(&a, &b));
    if let Datum::String(s) = &b {
        s.borrow_mut().push('!');
    }
    assert!(!is_equal(&a, &b));
}

#[test]
fn records_compare_fieldwise() {
    let point = RecordType::new("point", &["x", "y"]);
    let a = Datum::record(&point, vec![int(1), Datum::list([int(2)])]).unwrap();
    let b = Datum::record(&point, vec![int(1), Datum::list([int(2)])]).unwrap();
    let c = Datum::record(&point, vec![int(1), Datum::list([int(3)])]).unwrap();
    assert!(is_equal(&a, &b));
    assert!(!is_equal(&a, &c));
    assert!(!is_eqv(&a, &b));
}

// =============================================================================
// Cyclic structure
// =============================================================================

#[test]
fn circular_lists_with_equal_elements() {
    let a = self_loop(int(1));
    let b = self_loop(int(1));
    let c = self_loop(int(2));
    assert!(is_equal(&a, &b));
    assert!(!is_equal(&a, &c));
    for cell in [&a, &b, &c] {
        break_loop(cell);
    }
}

#[test]
fn cycles_of_different_periods_are_equal() {
    let a = self_loop(int(1));
    let b = Datum::cons(int(1), Datum::Nil);
    let b_tail = Datum::cons(int(1), b.clone());
    if let Datum::Pair(p) = &b {
        p.set_cdr(b_tail.clone());
    }
    // (1 1 1 ...) either way.
    assert!(is_equal(&a, &b));
    assert_eq!(pair_parts(&pair_parts(&b).1).1.to_string(), "#<pair>");
    break_loop(&a);
    break_loop(&b);
}

#[test]
fn vector_containing_itself() {
    let a = Datum::vector([int(0)]);
    let b = Datum::vector([int(0)]);
    for v in [&a, &b] {
        if let Datum::Vector(cells) = v {
            cells.borrow_mut().push(v.clone());
        }
    }
    assert!(is_equal(&a, &b));
    for v in [&a, &b] {
        if let Datum::Vector(cells) = v {
            cells.borrow_mut().clear();
        }
    }
}

#[test]
fn bounded_equal_gives_up_on_cycles() {
    let a = self_loop(int(1));
    let b = self_loop(int(1));
    let eqv = Equivalence::new().with_budget(64);
    assert_eq!(eqv.equal_bounded(&a, &b), EqualOutcome::PossibleCycle);
    assert_eq!(
        eqv.equal_bounded(&Datum::list([int(1)]), &Datum::list([int(1)])),
        EqualOutcome::Equal
    );
    break_loop(&a);
    break_loop(&b);
}

#[test]
fn bounded_equal_with_default_budget() {
    let a = Datum::list((0..100).map(int));
    let b = Datum::list((0..100).map(int));
    assert_eq!(equal_bounded(&a, &b), EqualOutcome::Equal);
    let c = Datum::list((0..99).map(int));
    assert_eq!(equal_bounded(&a, &c), EqualOutcome::NotEqual);
}

// =============================================================================
// Deep and long structure
// =============================================================================

const MAIN_THREAD_STACK: usize = 8 * 1024 * 1024;

fn on_main_sized_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(MAIN_THREAD_STACK)
        .spawn(f)
        .expect("spawn test thread")
        .join()
        .expect("test thread panicked")
}

/// `((((... leaf))))` nested through the car `depth` times.
fn car_nested(depth: usize, leaf: i64) -> Datum {
    (0..depth).fold(int(leaf), |inner, _| Datum::cons(inner, Datum::Nil))
}

#[test]
fn bounded_equal_past_the_default_budget_reports_possible_cycle() {
    let outcome = on_main_sized_stack(|| {
        let depth = default_budget() + 10;
        equal_bounded(&car_nested(depth, 7), &car_nested(depth, 7))
    });
    assert_eq!(outcome, EqualOutcome::PossibleCycle);
}

#[test]
fn bounded_equal_within_the_default_budget_answers() {
    let (same, different) = on_main_sized_stack(|| {
        let depth = default_budget() / 2;
        let a = car_nested(depth, 7);
        (
            equal_bounded(&a, &car_nested(depth, 7)),
            equal_bounded(&a, &car_nested(depth, 8)),
        )
    });
    assert_eq!(same, EqualOutcome::Equal);
    assert_eq!(different, EqualOutcome::NotEqual);
}

#[test]
fn unbounded_equal_on_deep_car_nesting() {
    let (same, different) = on_main_sized_stack(|| {
        let a = car_nested(1_000_000, 7);
        (is_equal(&a, &car_nested(1_000_000, 7)), is_equal(&a, &car_nested(1_000_000, 8)))
    });
    assert!(same);
    assert!(!different);
}

#[test]
fn long_lists_compare_and_free() {
    let equal = on_main_sized_stack(|| {
        let a = Datum::list((0..1_000_000).map(int));
        let b = Datum::list((0..1_000_000).map(int));
        is_equal(&a, &b)
    });
    assert!(equal);
}
