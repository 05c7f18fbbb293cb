// The rewriter: a small-step abstract machine over three stacks.
//
// `code` holds blocks yet to be evaluated (top = the "hand", the next
// thing to dispatch). `data` holds values produced so far. `sink`
// holds the immutable, already-committed prefix of the residual. All
// three are plain `Vec<Block>` with the last element as the top, in
// the idiom of a conventional stack machine: push is `Vec::push`, pop
// is `Vec::pop`.
//
// Every dispatch rule either makes progress or calls `thunk`, which
// is the only way the loop can get permanently stuck on a given head.
// There is no separate "unknown head" error: Rust's exhaustive match
// over the closed `Block` enum means every variant has a dispatch
// rule by construction, so the failure mode the distilled spec
// reserves for an unrecognised variant can't arise here.

use log::{debug, trace};

use crate::block::{catenate, Block};
use crate::dictionary::Dictionary;

/// Default step budget used by the `catena` binary and by `rewrite`.
pub const DEFAULT_GAS: u64 = 1_000_000;

struct State {
    code: Vec<Block>,
    data: Vec<Block>,
    sink: Vec<Block>,
}

impl State {
    fn new(input: Block) -> State {
        State {
            code: vec![input],
            data: Vec::new(),
            sink: Vec::new(),
        }
    }

    /// Data-stack element `index` slots from the top (0 = topmost).
    fn data_at(&self, index: usize) -> Option<&Block> {
        let len = self.data.len();
        if index >= len {
            None
        } else {
            Some(&self.data[len - 1 - index])
        }
    }

    /// Remove the top `n` data-stack elements. `n` must not exceed
    /// the current depth; callers check via `data_at` first.
    fn pop_data(&mut self, n: usize) {
        let new_len = self.data.len() - n;
        self.data.truncate(new_len);
    }

    /// Push `children` so that `children[0]` becomes the new hand.
    fn push_code_seq(&mut self, children: &[Block]) {
        for child in children.iter().rev() {
            self.code.push(child.clone());
        }
    }

    /// Flush the data stack and the stuck head into the sink.
    fn thunk(&mut self) {
        self.sink.extend(self.data.drain(..));
        if let Some(hand) = self.code.pop() {
            debug!("thunk on stuck head {}", hand);
            self.sink.push(hand);
        }
    }

    fn residual(&self) -> Block {
        let mut parts = Vec::with_capacity(self.sink.len() + self.data.len() + self.code.len());
        parts.extend(self.sink.iter().cloned());
        parts.extend(self.data.iter().cloned());
        parts.extend(self.code.iter().rev().cloned());
        catenate(parts)
    }
}

/// Rewrite `input` to a residual, spending at most `gas` steps, with
/// no dictionary attached (an unbound `Variable` always thunks).
pub fn rewrite(input: Block, gas: u64) -> Block {
    rewrite_with(input, gas, None)
}

/// Rewrite `input`, consulting `dict` (if given) whenever the hand is
/// a `Variable`.
pub fn rewrite_with(input: Block, mut gas: u64, dict: Option<&Dictionary>) -> Block {
    let mut state = State::new(input);
    while !state.code.is_empty() && gas > 0 {
        gas -= 1;
        step(&mut state, dict, &mut gas);
    }
    state.residual()
}

fn step(state: &mut State, dict: Option<&Dictionary>, gas: &mut u64) {
    let hand = state.code.last().cloned().expect("code is non-empty");
    trace!(
        "gas={} hand={} data_depth={} sink_depth={}",
        gas,
        hand,
        state.data.len(),
        state.sink.len()
    );

    match hand {
        Block::Id => {
            state.code.pop();
        }
        Block::Catenate(children) => {
            state.code.pop();
            state.push_code_seq(&children);
        }
        Block::Quote(_) | Block::String(_) | Block::Inl(_) | Block::Inr(_) | Block::Pair(_, _) => {
            state.code.pop();
            state.data.push(hand);
        }
        Block::Prompt(_) => {
            state.thunk();
            *gas = 0;
        }
        Block::Variable(ref name) => match dict.and_then(|d| d.get(name)) {
            Some(binding) => {
                state.code.pop();
                state.code.push(binding);
            }
            None => {
                state.thunk();
                *gas = 0;
            }
        },
        Block::RunInl(v) => {
            match (
                state.data_at(1).and_then(Block::body),
                state.data_at(0).and_then(Block::body),
            ) {
                (Some(inl), Some(_inr)) => {
                    state.code.pop();
                    state.pop_data(2);
                    state.code.push(inl);
                    state.data.push((*v).clone());
                }
                _ => state.thunk(),
            }
        }
        Block::RunInr(v) => {
            match (
                state.data_at(1).and_then(Block::body),
                state.data_at(0).and_then(Block::body),
            ) {
                (Some(_inl), Some(inr)) => {
                    state.code.pop();
                    state.pop_data(2);
                    state.code.push(inr);
                    state.data.push((*v).clone());
                }
                _ => state.thunk(),
            }
        }
        Block::RunPair(a, b) => {
            state.code.pop();
            state.data.push((*a).clone());
            state.data.push((*b).clone());
        }
        Block::Constant(name) => dispatch_constant(state, &name, gas),
    }
}

fn dispatch_constant(state: &mut State, name: &str, gas: &mut u64) {
    match name {
        "B" => match state.data_at(0).cloned() {
            Some(x) => {
                state.code.pop();
                state.data.push(x);
            }
            None => state.thunk(),
        },
        "C" => match state.data_at(0) {
            Some(_) => {
                state.code.pop();
                state.pop_data(1);
            }
            None => state.thunk(),
        },
        "D" => match (state.data_at(0).cloned(), state.data_at(1).cloned()) {
            (Some(top), Some(second)) => {
                state.code.pop();
                state.pop_data(2);
                state.data.push(top);
                state.data.push(second);
            }
            _ => state.thunk(),
        },
        "F" => {
            let rhs = state.data_at(0).and_then(Block::body);
            let lhs = state.data_at(1).and_then(Block::body);
            match (rhs, lhs) {
                (Some(rhs), Some(lhs)) => {
                    state.code.pop();
                    state.pop_data(2);
                    state.data.push(Block::quote(catenate(vec![lhs, rhs])));
                }
                _ => state.thunk(),
            }
        }
        "G" => match state.data_at(0).cloned() {
            Some(x) => {
                state.code.pop();
                state.pop_data(1);
                state.data.push(Block::quote(x));
            }
            None => state.thunk(),
        },
        "H" => match state.data_at(0).and_then(Block::body) {
            Some(body) => {
                state.code.pop();
                state.pop_data(1);
                state.code.push(body);
            }
            None => {
                state.thunk();
                *gas = 0;
            }
        },
        "J" => match state.data_at(0).cloned() {
            Some(x) => {
                state.code.pop();
                state.pop_data(1);
                state.data.push(Block::inl(x));
            }
            None => state.thunk(),
        },
        "K" => match state.data_at(0).cloned() {
            Some(x) => {
                state.code.pop();
                state.pop_data(1);
                state.data.push(Block::inr(x));
            }
            None => state.thunk(),
        },
        "L" => match (state.data_at(0).cloned(), state.data_at(1).cloned()) {
            (Some(snd), Some(fst)) => {
                state.code.pop();
                state.pop_data(2);
                state.data.push(Block::pair(fst, snd));
            }
            _ => state.thunk(),
        },
        "M" => {
            state.code.pop();
        }
        "N" => {
            state.thunk();
            *gas = 0;
        }
        // A well-formed but undefined constant (anything outside
        // B..N) can never become un-stuck: treat it like `N`.
        _ => {
            state.thunk();
            *gas = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;

    fn assert_rewrites_to(source: &str, expect: &str) {
        let input = read(source).unwrap();
        let result = rewrite(input, DEFAULT_GAS);
        assert_eq!(result.to_string(), expect, "rewriting {:?}", source);
    }

    #[test]
    fn duplicate() {
        assert_rewrites_to("[foo] B", "[foo] [foo]");
    }

    #[test]
    fn drop() {
        assert_rewrites_to("[foo] C", "");
    }

    #[test]
    fn swap() {
        assert_rewrites_to("[foo] [bar] D", "[bar] [foo]");
        assert_rewrites_to("\"a\" \"b\" D", "\"b\" \"a\"");
    }

    #[test]
    fn concat_quote() {
        assert_rewrites_to("[foo] [bar] F", "[foo bar]");
    }

    #[test]
    fn wrap() {
        assert_rewrites_to("[foo] G", "[[foo]]");
    }

    #[test]
    fn apply() {
        assert_rewrites_to("[foo] H", "foo");
    }

    #[test]
    fn inject_left_then_apply() {
        assert_rewrites_to("[foo] [bar] [value] J H", "[value] foo");
    }

    #[test]
    fn inject_right_then_apply() {
        assert_rewrites_to("[foo] [bar] [value] K H", "[value] bar");
    }

    #[test]
    fn pair_then_apply() {
        assert_rewrites_to("[foo] [bar] L H", "[foo] [bar]");
    }

    #[test]
    fn prompt_is_a_fixed_point() {
        assert_rewrites_to("{ Hello, world. }", "{ Hello, world. }");
    }

    #[test]
    fn no_op() {
        assert_rewrites_to("[foo] M", "[foo]");
    }

    #[test]
    fn reserved_n_always_thunks() {
        assert_rewrites_to("[foo] N", "[foo] N");
    }

    #[test]
    fn h_on_non_value_thunks_not_panics() {
        // `x` is a bare Variable on top of data; H can't lower it.
        assert_rewrites_to("x H", "x H");
    }

    #[test]
    fn f_with_one_operand_thunks_with_operand_in_sink() {
        assert_rewrites_to("[foo] F", "[foo] F");
    }

    #[test]
    fn zero_gas_is_identity() {
        let input = read("[foo] [bar] D").unwrap();
        let result = rewrite(input.clone(), 0);
        assert_eq!(result, input);
    }

    #[test]
    fn unbound_variable_thunks() {
        assert_rewrites_to("foo", "foo");
    }

    #[test]
    fn bound_variable_is_substituted() {
        let dict = Dictionary::new();
        dict.define("id", read("[x] H").unwrap());
        let input = read("[hi] id").unwrap();
        let result = rewrite_with(input, DEFAULT_GAS, Some(&dict));
        // `id` expands to `[x] H`, which immediately applies and
        // leaves the still-unbound `x` to thunk on its own.
        assert_eq!(result.to_string(), "[hi] x");
    }

    #[test]
    fn rewrite_is_idempotent_on_a_residual() {
        let once = rewrite(read("[foo] N").unwrap(), DEFAULT_GAS);
        let twice = rewrite(once.clone(), DEFAULT_GAS);
        assert_eq!(once, twice);
    }

    #[test]
    fn catenation_executes_left_to_right() {
        // Each `D` swaps whatever is on top of the data stack at the
        // moment it runs, so the two swaps act independently on
        // successive pairs rather than on the whole stack at once.
        assert_rewrites_to("[a] [b] D [c] [d] D", "[b] [a] [d] [c]");
    }
}
