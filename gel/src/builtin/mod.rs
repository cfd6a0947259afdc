use crate::args::Args;
use crate::error::Result;
use crate::procedure::Procedure;
use crate::scope::Scope;
use crate::value::Value;

use std::rc::Rc;

mod arith;
mod functional;
mod lists;
mod logic;
mod misc;
mod strings;

type Builtin = fn(&Rc<Scope>, &mut Args) -> Result<Value>;

fn register(fns: &mut Vec<(String, Value)>, name: &str, f: Builtin) {
    fns.push((name.to_string(), Value::native(name, f)));
}

/// The standard function library, in lookup order.
pub fn builtins() -> Vec<(String, Value)> {
    let mut fns = Vec::new();

    register(&mut fns, "toString", strings::to_string);
    register(&mut fns, "+", arith::plus);
    register(&mut fns, "-", arith::minus);
    register(&mut fns, "/", arith::divide);
    register(&mut fns, "*", arith::times);
    register(&mut fns, "isNaN", arith::is_nan);
    register(&mut fns, "max", arith::max);
    register(&mut fns, "min", arith::min);
    register(&mut fns, ">", arith::greater);
    register(&mut fns, "<", arith::less);
    register(&mut fns, ">=", arith::greater_equal);
    register(&mut fns, "<=", arith::less_equal);
    register(&mut fns, "double", arith::double);

    register(&mut fns, "?", logic::ternary);
    register(&mut fns, "!", logic::not);
    register(&mut fns, "=", logic::loose_eq);
    register(&mut fns, "==", logic::strict_eq);
    register(&mut fns, "!=", logic::loose_ne);
    register(&mut fns, "!==", logic::strict_ne);
    register(&mut fns, "||", logic::or);
    register(&mut fns, "|", logic::either);
    register(&mut fns, "&&", logic::and);

    register(&mut fns, "object", lists::object);
    register(&mut fns, "array", lists::array);
    register(&mut fns, "map", lists::map);
    register(&mut fns, "sort", lists::sort);
    register(&mut fns, "filter", lists::filter);
    register(&mut fns, "findOne", lists::find_one);
    register(&mut fns, "fold", lists::fold);
    register(&mut fns, "last", lists::last);

    register(&mut fns, "concat", strings::concat);
    register(&mut fns, "join", strings::join);
    register(&mut fns, "slice", strings::slice);
    register(&mut fns, "length", strings::length);
    register(&mut fns, "getValue", strings::get_value);
    register(&mut fns, "compare", strings::compare);
    register(&mut fns, "contains", strings::contains);
    register(&mut fns, "charAt", strings::char_at);
    register(&mut fns, "toLowerCase", strings::to_lower_case);
    register(&mut fns, "format", strings::format);
    register(&mut fns, "refine", strings::refine);

    let add_days = Value::native("addDays", misc::add_days);
    let date = Procedure::builtin("date", Rc::new(misc::date))
        .with_property("addDays", add_days.clone());
    fns.push((format!("date"), date.into()));
    fns.push((format!("addDays"), add_days));
    register(&mut fns, "toJSON", misc::to_json);
    register(&mut fns, "fromJSON", misc::from_json);

    register(&mut fns, "partial", functional::partial);
    register(&mut fns, "flip", functional::flip);
    register(&mut fns, "compose", functional::compose);
    register(&mut fns, "apply", functional::apply);
    fns
}
