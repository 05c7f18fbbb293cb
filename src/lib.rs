// catena: a term-rewriting interpreter for a concatenative
// combinator calculus.
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public License
// as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this program.  If not, see
// <https://www.gnu.org/licenses/>.
//
// Programs are sequences of blocks (see `block`) juxtaposed on an
// implicit stack machine. `reader::read` turns source text into a
// `Block`; `rewriter::rewrite` runs the small-step abstract machine
// to a residual, spending a caller-supplied gas budget, and thunks
// (rather than erroring) whenever a reduction gets stuck.

pub mod block;
pub mod dictionary;
pub mod error;
pub mod reader;
pub mod rewriter;

pub use block::{catenate, Block};
pub use dictionary::Dictionary;
pub use error::{ReadError, ReadErrorKind};
pub use reader::read;
pub use rewriter::{rewrite, rewrite_with, DEFAULT_GAS};

/// Parse and rewrite `source` in one step, with no dictionary attached.
pub fn rewrite_source(source: &str, gas: u64) -> Result<Block, ReadError> {
    Ok(rewrite(read(source)?, gas))
}
