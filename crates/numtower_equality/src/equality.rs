//! `eq?`, `eqv?`, `equal?`, and the bounded `equal?` variant.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

use log::debug;
use numtower_foundation::{Number, num_eq};

use crate::datum::Datum;
use crate::hooks::{NoObjectHooks, ObjectHooks};

/// Stack size of a default main thread.
const ASSUMED_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Stack bytes per level of a native recursive walk; unoptimized frames are larger.
const STACK_BYTES_PER_CALL: usize = if cfg!(debug_assertions) { 200 } else { 100 };

/// Default budget for [`Equivalence::equal_bounded`], computed once.
///
/// The nesting depth a recursive walk could reach on a main-thread stack.
/// The walk itself keeps pending nodes on the heap, so exceeding it never
/// touches the call stack.
#[must_use]
pub fn default_budget() -> usize {
    static BUDGET: OnceLock<usize> = OnceLock::new();
    *BUDGET.get_or_init(|| {
        let budget = ASSUMED_STACK_SIZE / STACK_BYTES_PER_CALL;
        debug!("bounded equal? budget: {budget} steps");
        budget
    })
}

/// Result of a bounded structural comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EqualOutcome {
    /// The values are `equal?`.
    Equal,
    /// The values are not `equal?`.
    NotEqual,
    /// The budget ran out; the structures are probably cyclic.
    PossibleCycle,
}

impl From<bool> for EqualOutcome {
    fn from(equal: bool) -> Self {
        if equal { Self::Equal } else { Self::NotEqual }
    }
}

/// Marker for a bounded comparison that ran out of budget.
struct BudgetExhausted;

/// Identity of a pair of compound nodes under comparison.
type NodePair = (*const (), *const ());

// =============================================================================
// eq?
// =============================================================================

/// `eq?`: the same object.
///
/// Atoms without identity (booleans, characters, the empty list, fixnums)
/// compare by value; reals compare by bit pattern.
#[must_use]
pub fn is_eq(x: &Datum, y: &Datum) -> bool {
    match (x, y) {
        (Datum::Nil, Datum::Nil) => true,
        (Datum::Bool(a), Datum::Bool(b)) => a == b,
        (Datum::Char(a), Datum::Char(b)) => a == b,
        (Datum::Symbol(a), Datum::Symbol(b)) => Rc::ptr_eq(a, b),
        (Datum::String(a), Datum::String(b)) => Rc::ptr_eq(a, b),
        (Datum::Pair(a), Datum::Pair(b)) => Rc::ptr_eq(a, b),
        (Datum::Vector(a), Datum::Vector(b)) | (Datum::Box(a), Datum::Box(b)) => Rc::ptr_eq(a, b),
        (Datum::Record(a), Datum::Record(b)) => Rc::ptr_eq(a, b),
        (Datum::Instance(a), Datum::Instance(b)) => Rc::ptr_eq(a, b),
        (Datum::Extended(a), Datum::Extended(b)) => Rc::ptr_eq(a, b),
        (Datum::Number(a), Datum::Number(b)) => number_is_eq(a, b),
        _ => false,
    }
}

fn number_is_eq(x: &Number, y: &Number) -> bool {
    match (x, y) {
        (Number::Fixnum(a), Number::Fixnum(b)) => a == b,
        (Number::Real(a), Number::Real(b)) => a.to_bits() == b.to_bits(),
        (Number::Bignum(a), Number::Bignum(b)) => Arc::ptr_eq(a, b),
        (Number::Rational(a), Number::Rational(b)) => Arc::ptr_eq(a, b),
        (Number::Complex(a), Number::Complex(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

// =============================================================================
// Equivalence context
// =============================================================================

/// The equivalence predicates with host hooks and a recursion budget.
pub struct Equivalence {
    hooks: Box<dyn ObjectHooks>,
    budget: usize,
}

impl fmt::Debug for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equivalence")
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

impl Default for Equivalence {
    fn default() -> Self {
        Self::new()
    }
}

impl Equivalence {
    /// A context without an object system and with the default budget.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: Box::new(NoObjectHooks),
            budget: default_budget(),
        }
    }

    /// Installs object-system hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl ObjectHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Overrides the bounded-comparison budget.
    #[must_use]
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// The bounded-comparison budget.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// `eqv?`.
    ///
    /// Beyond `eq?`: symbols with the same name, numbers with the same
    /// exactness that are `=`, instances the hooks call `eqv?`, and
    /// extended values of the same type that call themselves `eqv?`.
    #[must_use]
    pub fn is_eqv(&self, x: &Datum, y: &Datum) -> bool {
        if is_eq(x, y) {
            return true;
        }
        match (x, y) {
            (Datum::Symbol(a), Datum::Symbol(b)) => a == b,
            (Datum::Number(a), Datum::Number(b)) => a.is_exact() == b.is_exact() && num_eq(a, b),
            (Datum::Instance(a), Datum::Instance(b)) => self.hooks.object_eqv(a, b),
            (Datum::Extended(a), Datum::Extended(b)) => {
                a.type_name() == b.type_name() && a.eqv(b.as_ref())
            }
            _ => false,
        }
    }

    /// `equal?`: structural comparison that terminates on cyclic input.
    ///
    /// Pending node pairs live on a heap work list, so neither long tails
    /// nor deep element nesting grow the call stack. Compound node pairs
    /// already under comparison are assumed equal, so shared and cyclic
    /// structure compares co-inductively.
    #[must_use]
    pub fn is_equal(&self, x: &Datum, y: &Datum) -> bool {
        matches!(self.walk(x, y, None), Ok(true))
    }

    /// `equal?` bounded by the context's budget.
    ///
    /// Every step (into an element or along a tail) spends one unit of
    /// the budget carried by that path; running out reports
    /// [`EqualOutcome::PossibleCycle`] instead of an answer.
    #[must_use]
    pub fn equal_bounded(&self, x: &Datum, y: &Datum) -> EqualOutcome {
        match self.walk(x, y, Some(self.budget)) {
            Ok(equal) => equal.into(),
            Err(BudgetExhausted) => {
                debug!("bounded equal? exhausted its budget of {}", self.budget);
                EqualOutcome::PossibleCycle
            }
        }
    }

    /// Structural comparison over an explicit work list.
    ///
    /// With a budget, each path spends one unit per node and no visited set
    /// is kept; without one, visited compound pairs are assumed equal.
    fn walk(&self, x: &Datum, y: &Datum, budget: Option<usize>) -> Result<bool, BudgetExhausted> {
        let mut visited: HashSet<NodePair> = HashSet::new();
        let mut pending = vec![(x.clone(), y.clone(), budget)];
        while let Some((x, y, budget)) = pending.pop() {
            if self.is_eqv(&x, &y) {
                continue;
            }
            let budget = budget
                .map(|left| left.checked_sub(1).ok_or(BudgetExhausted))
                .transpose()?;
            let mut seen = |a: *const (), b: *const ()| budget.is_none() && !visited.insert((a, b));
            match (&x, &y) {
                (Datum::Pair(a), Datum::Pair(b)) => {
                    if seen(Rc::as_ptr(a).cast(), Rc::as_ptr(b).cast()) {
                        continue;
                    }
                    pending.push((a.cdr(), b.cdr(), budget));
                    pending.push((a.car(), b.car(), budget));
                }
                (Datum::String(a), Datum::String(b)) => {
                    if *a.borrow() != *b.borrow() {
                        return Ok(false);
                    }
                }
                (Datum::Vector(a), Datum::Vector(b)) | (Datum::Box(a), Datum::Box(b)) => {
                    if seen(Rc::as_ptr(a).cast(), Rc::as_ptr(b).cast()) {
                        continue;
                    }
                    let (a, b) = (a.borrow(), b.borrow());
                    if a.len() != b.len() {
                        return Ok(false);
                    }
                    push_elements(&mut pending, &a, &b, budget);
                }
                (Datum::Record(a), Datum::Record(b)) => {
                    if !Rc::ptr_eq(a.record_type(), b.record_type()) {
                        return Ok(false);
                    }
                    if seen(Rc::as_ptr(a).cast(), Rc::as_ptr(b).cast()) {
                        continue;
                    }
                    let (a, b) = (a.fields(), b.fields());
                    push_elements(&mut pending, &a, &b, budget);
                }
                (Datum::Instance(a), Datum::Instance(b)) => {
                    if !self.hooks.object_equal(a, b) {
                        return Ok(false);
                    }
                }
                (Datum::Extended(a), Datum::Extended(b)) => {
                    if a.type_name() != b.type_name() || !a.equal(b.as_ref()) {
                        return Ok(false);
                    }
                }
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

/// Queues element pairs so the first element is compared first.
fn push_elements(
    pending: &mut Vec<(Datum, Datum, Option<usize>)>,
    a: &[Datum],
    b: &[Datum],
    budget: Option<usize>,
) {
    pending.extend(a.iter().zip(b).rev().map(|(p, q)| (p.clone(), q.clone(), budget)));
}

// =============================================================================
// Free functions
// =============================================================================

/// `eqv?` without object-system hooks.
#[must_use]
pub fn is_eqv(x: &Datum, y: &Datum) -> bool {
    Equivalence::new().is_eqv(x, y)
}

/// `equal?` without object-system hooks.
#[must_use]
pub fn is_equal(x: &Datum, y: &Datum) -> bool {
    Equivalence::new().is_equal(x, y)
}

/// Bounded `equal?` without object-system hooks and with the default
/// budget.
#[must_use]
pub fn equal_bounded(x: &Datum, y: &Datum) -> EqualOutcome {
    Equivalence::new().equal_bounded(x, y)
}
