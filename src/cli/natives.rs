//! List the native library.

use clap::Args;

use crate::bridge::registry;
use crate::error::Result;

/// List every registered native and its signatures
#[derive(Args, Debug)]
pub struct NativesArgs {
    /// Only show names starting with this prefix (e.g. `Apol`)
    pub prefix: Option<String>,
}

pub fn run(args: NativesArgs) -> Result<()> {
    print!("{}", listing(args.prefix.as_deref()));
    Ok(())
}

/// One line per overload, grouped by class.
pub fn listing(prefix: Option<&str>) -> String {
    let mut out = String::new();
    for class in registry().classes() {
        let callables: Vec<_> = class
            .callables()
            .filter(|c| prefix.map_or(true, |p| c.name.starts_with(p)))
            .collect();
        if callables.is_empty() {
            continue;
        }

        out.push_str(&format!("{} ({})\n", class.kind, class.kind.script_name()));
        for callable in callables {
            for sig in callable.overloads().signatures() {
                out.push_str(&format!("  {}{}\n", callable.name, sig));
            }
        }
    }
    out
}
