//! The type arena: an allocator of [`TypeData`] nodes addressed by stable
//! [`TypeId`] handles (spec §3.3).
//!
//! Composite types are *not* hash-consed — two structurally identical unions
//! built independently get distinct `TypeId`s. Deduplication only happens
//! where the spec calls for it (union members, §4.1 `signature`), keyed by
//! [`signature`](crate::signature::signature), not by arena identity.

use std::rc::Rc;

/// A stable handle into a [`TypeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// Identity of a type variable. Two variables are the same type iff their
/// `VarId`s match — printable names are for display only (spec §3.3 "Type
/// variable: fresh, equality by identity, carries a printable name").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

/// Identity of an unresolved-type placeholder (spec §3.3, §4.1 "Unresolved
/// types").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnresolvedId(pub u32);

/// Why a particular `error` type was produced (spec §3.3 "Error type").
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorReason {
    /// No mapping of a function type matched the argument patterns.
    Undefined,
    /// A call supplied the wrong number of arguments.
    ArityMismatch { expected: usize, actual: usize },
}

/// One arm of a polymorphic function type (spec §3.3 "Function type").
#[derive(Clone, Debug)]
pub struct Mapping {
    /// Type variables this mapping introduces; `substitute` must not
    /// descend into `patterns`/`result` when the substitution key shadows
    /// one of these (spec §4.1 "Function-type α-safety").
    pub bindings: Vec<VarId>,
    pub patterns: Vec<Pattern>,
    pub result: TypeId,
}

/// One arm of a [`TypeData::Conditional`] (spec §3.3 "Conditional type").
#[derive(Clone, Debug)]
pub struct Branch {
    pub predicates: Vec<(VarId, Pattern)>,
    pub result: TypeId,
}

/// A pattern matched against a single argument type during `apply` (spec
/// §4.1 "Function application with mappings").
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Exact equality to a primitive (or primitive-shaped) type.
    Primitive(TypeId),
    /// An applied-type pattern: the receiver must match `head` exactly and
    /// each argument must match the corresponding sub-pattern.
    Applied { head: TypeId, args: Vec<Pattern> },
    /// Matches any function of the given arity, binding the whole function
    /// type to `bind`.
    Function { arity: usize, bind: VarId },
    /// Matches anything, binding it to `bind`.
    Var(VarId),
}

impl Pattern {
    pub fn arity_of_applied(head: TypeId, args: Vec<Pattern>) -> Self {
        Pattern::Applied { head, args }
    }
}

#[derive(Clone, Debug)]
pub enum TypeData {
    Never,
    Null,
    Bool,
    Number,
    String,
    /// The `array` type constructor; only meaningful applied to one
    /// argument (spec §3.3).
    ArrayCtor,
    Var(VarId, Rc<str>),
    Union(Vec<TypeId>),
    Applied {
        receiver: TypeId,
        args: Vec<TypeId>,
    },
    Function(Vec<Mapping>),
    Conditional(Vec<Branch>),
    Unresolved(UnresolvedId, Rc<str>),
    Error(ErrorReason),
}

/// Allocator and home for every type node built during one evaluator/analyzer
/// run. Cheap to grow (`Vec<TypeData>`), never shrinks.
#[derive(Debug, Default)]
pub struct TypeArena {
    nodes: Vec<TypeData>,
    next_var: u32,
    next_unresolved: u32,
    well_known: Option<WellKnown>,
}

#[derive(Debug, Clone, Copy)]
struct WellKnown {
    never: TypeId,
    null: TypeId,
    bool_: TypeId,
    number: TypeId,
    string: TypeId,
    array_ctor: TypeId,
}

impl TypeArena {
    pub fn new() -> Self {
        let mut arena = TypeArena {
            nodes: Vec::new(),
            next_var: 0,
            next_unresolved: 0,
            well_known: None,
        };
        let never = arena.push(TypeData::Never);
        let null = arena.push(TypeData::Null);
        let bool_ = arena.push(TypeData::Bool);
        let number = arena.push(TypeData::Number);
        let string = arena.push(TypeData::String);
        let array_ctor = arena.push(TypeData::ArrayCtor);
        arena.well_known = Some(WellKnown {
            never,
            null,
            bool_,
            number,
            string,
            array_ctor,
        });
        arena
    }

    fn push(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.nodes[id.0 as usize]
    }

    pub fn never(&self) -> TypeId {
        self.well_known.unwrap().never
    }
    pub fn null(&self) -> TypeId {
        self.well_known.unwrap().null
    }
    pub fn bool_(&self) -> TypeId {
        self.well_known.unwrap().bool_
    }
    pub fn number(&self) -> TypeId {
        self.well_known.unwrap().number
    }
    pub fn string(&self) -> TypeId {
        self.well_known.unwrap().string
    }
    pub fn array_ctor(&self) -> TypeId {
        self.well_known.unwrap().array_ctor
    }

    pub fn fresh_var(&mut self, name: impl Into<Rc<str>>) -> TypeId {
        let id = VarId(self.next_var);
        self.next_var += 1;
        self.push(TypeData::Var(id, name.into()))
    }

    pub fn fresh_unresolved(&mut self, name: impl Into<Rc<str>>) -> (UnresolvedId, TypeId) {
        let id = UnresolvedId(self.next_unresolved);
        self.next_unresolved += 1;
        let ty = self.push(TypeData::Unresolved(id, name.into()));
        (id, ty)
    }

    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        let deduped = crate::dedupe::dedupe_union_members(self, members);
        match deduped.len() {
            0 => self.never(),
            1 => deduped[0],
            _ => self.push(TypeData::Union(deduped)),
        }
    }

    pub fn applied(&mut self, receiver: TypeId, args: Vec<TypeId>) -> TypeId {
        if matches!(self.get(receiver), TypeData::Never) {
            return self.never();
        }
        self.push(TypeData::Applied { receiver, args })
    }

    pub fn function(&mut self, mappings: Vec<Mapping>) -> TypeId {
        self.push(TypeData::Function(mappings))
    }

    pub fn conditional(&mut self, branches: Vec<Branch>) -> TypeId {
        self.push(TypeData::Conditional(branches))
    }

    pub fn error(&mut self, reason: ErrorReason) -> TypeId {
        self.push(TypeData::Error(reason))
    }

    /// Convenience: `array(T)` (spec §8 "Applied-type round trip").
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        let ctor = self.array_ctor();
        self.applied(ctor, vec![element])
    }
}
