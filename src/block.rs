// The combinator term algebra.
//
// A `Block` is an immutable node in the program term. Recursive
// variants wrap their children in `Rc` so that cloning a block (which
// the rewriter does constantly, pushing and popping stacks) is cheap
// and sharing is free. No cycle can form because blocks are only ever
// built bottom-up by the reader and the rewriter.

use std::fmt;
use std::rc::Rc;

/// A term of the combinator calculus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Unit of catenation. Prints as the empty string.
    Id,
    /// A built-in operator name, e.g. `B`, `H`.
    Constant(Rc<str>),
    /// A free symbol. Never reduced unless a dictionary binds it.
    Variable(Rc<str>),
    /// Normalised sequencing of two or more blocks.
    Catenate(Rc<Vec<Block>>),
    /// Suspended code; a value.
    Quote(Rc<Block>),
    /// An opaque string literal; a value.
    String(Rc<str>),
    /// An opaque, currently-unreducible literal; a value.
    Prompt(Rc<str>),
    /// Left injection; a value.
    Inl(Rc<Block>),
    /// Right injection; a value.
    Inr(Rc<Block>),
    /// A pair; a value.
    Pair(Rc<Block>, Rc<Block>),
    /// Lowered form of `Inl` under an eliminator.
    RunInl(Rc<Block>),
    /// Lowered form of `Inr` under an eliminator.
    RunInr(Rc<Block>),
    /// Lowered form of `Pair` under an eliminator.
    RunPair(Rc<Block>, Rc<Block>),
}

impl Block {
    pub fn id() -> Block {
        Block::Id
    }

    /// The canonical empty quote, `[]`, distinct from `Id`.
    pub fn unit() -> Block {
        Block::quote(Block::Id)
    }

    pub fn constant(name: impl Into<Rc<str>>) -> Block {
        Block::Constant(name.into())
    }

    pub fn variable(name: impl Into<Rc<str>>) -> Block {
        Block::Variable(name.into())
    }

    pub fn quote(body: Block) -> Block {
        Block::Quote(Rc::new(body))
    }

    pub fn string(value: impl Into<Rc<str>>) -> Block {
        Block::String(value.into())
    }

    pub fn prompt(value: impl Into<Rc<str>>) -> Block {
        Block::Prompt(value.into())
    }

    pub fn pair(fst: Block, snd: Block) -> Block {
        Block::Pair(Rc::new(fst), Rc::new(snd))
    }

    pub fn inl(body: Block) -> Block {
        Block::Inl(Rc::new(body))
    }

    pub fn inr(body: Block) -> Block {
        Block::Inr(Rc::new(body))
    }

    /// True for the variants that may legally sit on the data stack.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Block::Quote(_)
                | Block::Inl(_)
                | Block::Inr(_)
                | Block::Pair(_, _)
                | Block::String(_)
                | Block::Prompt(_)
        )
    }

    /// The lowering projection. `None` means "no such property" —
    /// the caller should treat this as a thunk trigger.
    pub fn body(&self) -> Option<Block> {
        match self {
            Block::Quote(body) => Some((**body).clone()),
            Block::Inl(e) => Some(Block::RunInl(e.clone())),
            Block::Inr(e) => Some(Block::RunInr(e.clone())),
            Block::Pair(a, b) => Some(Block::RunPair(a.clone(), b.clone())),
            _ => None,
        }
    }
}

/// Normalise a sequence of blocks by the catenation contract: skip
/// `Id`, splice nested `Catenate`, otherwise append. Empty input
/// collapses to `Id`; a single surviving block is returned bare.
pub fn catenate(blocks: impl IntoIterator<Item = Block>) -> Block {
    let mut children = Vec::new();
    for block in blocks {
        match block {
            Block::Id => {}
            Block::Catenate(nested) => children.extend(nested.iter().cloned()),
            other => children.push(other),
        }
    }
    match children.len() {
        0 => Block::Id,
        1 => children.pop().unwrap(),
        _ => Block::Catenate(Rc::new(children)),
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Id => Ok(()),
            Block::Constant(name) => write!(f, "{}", name),
            Block::Variable(name) => write!(f, "{}", name),
            Block::Catenate(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Block::Quote(body) => write!(f, "[{}]", body),
            Block::String(value) => write!(f, "\"{}\"", value),
            Block::Prompt(value) => write!(f, "{{{}}}", value),
            Block::Inl(e) => write!(f, "{} J", e),
            Block::Inr(e) => write!(f, "{} K", e),
            Block::Pair(a, b) => write!(f, "{} {} L", a, b),
            Block::RunInl(e) => write!(f, "{} J H", e),
            Block::RunInr(e) => write!(f, "{} K H", e),
            Block::RunPair(a, b) => write!(f, "{} {} L H", a, b),
        }
    }
}
