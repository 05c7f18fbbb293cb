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

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::process::exit;

use clap::Parser;

use catena::{read, rewrite_with, Dictionary, DEFAULT_GAS};

/// Rewrite a concatenative combinator program to its residual.
#[derive(Parser, Debug)]
#[clap(name = "catena")]
struct Args {
    /// Source file to rewrite, or "-" to read from stdin.
    source: String,

    /// Step budget to spend before giving up and printing whatever's
    /// left.
    #[clap(long, default_value_t = DEFAULT_GAS)]
    gas: u64,

    /// A TOML file mapping variable names to source fragments, loaded
    /// as bindings available to the program.
    #[clap(long)]
    dictionary: Option<String>,
}

fn load_dictionary(path: &str) -> Result<Dictionary, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let bindings: HashMap<String, String> =
        toml::from_str(&text).map_err(|e| format!("{}: {}", path, e))?;

    let dict = Dictionary::new();
    for (name, source) in bindings {
        let block = read(&source).map_err(|e| format!("{}: {}={}: {}", path, name, source, e))?;
        dict.define(name, block);
    }
    Ok(dict)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let source = if args.source == "-" {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error reading stdin: {}", e);
            exit(1);
        }
        buf
    } else {
        match fs::read_to_string(&args.source) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("error reading {}: {}", args.source, e);
                exit(1);
            }
        }
    };

    let dict = match args.dictionary.as_deref().map(load_dictionary) {
        Some(Ok(dict)) => Some(dict),
        Some(Err(e)) => {
            eprintln!("error loading dictionary: {}", e);
            exit(1);
        }
        None => None,
    };

    let program = match read(&source) {
        Ok(block) => block,
        Err(e) => {
            eprintln!("error reading program: {}", e);
            exit(1);
        }
    };

    let residual = rewrite_with(program, args.gas, dict.as_ref());
    println!("{}", residual);
}
