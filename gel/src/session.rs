use crate::args::{Arg, Args};
use crate::builtin::builtins;
use crate::error::Result;
use crate::eval::{self, Evaluator, DEFAULT_MAX_DEPTH};
use crate::parser::{self, Node};
use crate::registry::Registry;
use crate::scope::Scope;
use crate::stats::{ExprStats, Stats};
use crate::token::Token;
use crate::tokenizer::{self, Categories, KeywordRecognizer, Recognizer};
use crate::value::Value;

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info};

/// Host supplied variables, visible above the builtin functions.
pub type Bindings = HashMap<String, Value>;

/// The shared default level of every session registry.
#[derive(Clone)]
pub struct Defaults {
    pub nests: tokenizer::Defaults<Recognizer>,
    pub primitives: tokenizer::Defaults<Recognizer>,
    pub identifiers: tokenizer::Defaults<Recognizer>,
    pub keywords: tokenizer::Defaults<KeywordRecognizer>,
    pub functions: Rc<Vec<(String, Value)>>,
}

thread_local! {
    static STANDARD: Defaults = Defaults{
        nests: tokenizer::default_nests(),
        primitives: tokenizer::default_primitives(),
        identifiers: tokenizer::default_identifiers(),
        keywords: tokenizer::default_keywords(),
        functions: Rc::new(builtins()),
    };
}

impl Defaults {
    /// The standard recognizers, keywords and library. Every call on a
    /// thread hands out the same shared tables.
    pub fn standard() -> Defaults {
        STANDARD.with(|defaults| defaults.clone())
    }
}

/// A top level node together with what it evaluated to.
#[derive(Clone, Debug)]
pub struct Evaluated {
    pub node: Rc<Node>,
    pub result: Value,
}

/// Tokenizes, parses and evaluates expressions, memoizing tokens and
/// trees by exact text.
pub struct Session {
    categories: Categories,
    keywords: Registry<KeywordRecognizer>,
    functions: Registry<Value>,
    tokens: RefCell<HashMap<String, Vec<Token>>>,
    trees: RefCell<HashMap<String, Rc<[Rc<Node>]>>>,
    stats: RefCell<Stats>,
    library: RefCell<Option<Rc<Scope>>>,
    max_depth: usize,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session::with_defaults(&Defaults::standard())
    }

    pub fn with_defaults(defaults: &Defaults) -> Session {
        Session{
            categories: Categories::new(defaults.nests.clone(), defaults.primitives.clone(),
                                        defaults.identifiers.clone()),
            keywords: Registry::new(defaults.keywords.clone()),
            functions: Registry::new(defaults.functions.clone()),
            tokens: RefCell::new(HashMap::new()),
            trees: RefCell::new(HashMap::new()),
            stats: RefCell::new(Stats::default()),
            library: RefCell::new(None),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Bounds both the parsed tree height and the evaluation nesting.
    pub fn with_max_depth(mut self, max_depth: usize) -> Session {
        self.max_depth = max_depth;
        self.clear_caches();
        self
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    // recognizers decide what text means, so memoized results go stale
    pub fn categories_mut(&mut self) -> &mut Categories {
        self.clear_caches();
        &mut self.categories
    }

    pub fn keywords(&self) -> &Registry<KeywordRecognizer> {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut Registry<KeywordRecognizer> {
        self.clear_caches();
        &mut self.keywords
    }

    pub fn functions(&self) -> &Registry<Value> {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut Registry<Value> {
        self.library.get_mut().take();
        &mut self.functions
    }

    /// Adds or shadows a function for this session only.
    pub fn register_function<F>(&mut self, name: &str, f: F)
        where F: Fn(&Rc<Scope>, &mut Args) -> Result<Value> + 'static
    {
        self.functions_mut().insert(name, Value::native(name, f));
    }

    fn clear_caches(&mut self) {
        self.tokens.get_mut().clear();
        self.trees.get_mut().clear();
    }

    /// Memoized tokenization, every caller gets its own copy.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        if let Some(tokens) = self.tokens.borrow().get(text) {
            return Ok(tokens.clone());
        }
        debug!(text, "tokenizing");
        let tokens = tokenizer::tokenize(text, &self.categories, &self.keywords)?;
        self.tokens.borrow_mut().insert(text.to_string(), tokens.clone());
        Ok(tokens)
    }

    pub fn parse(&self, tokens: &[Token]) -> Result<Vec<Rc<Node>>> {
        parser::parse_with_depth(tokens, self.max_depth)
    }

    fn tree(&self, text: &str) -> Result<Rc<[Rc<Node>]>> {
        if let Some(tree) = self.trees.borrow().get(text) {
            return Ok(tree.clone());
        }
        let tokens = self.tokenize(text)?;
        let tree: Rc<[Rc<Node>]> = self.parse(&tokens)?.into();
        debug!(text, nodes = tree.len(), "parsed");
        self.trees.borrow_mut().insert(text.to_string(), tree.clone());
        Ok(tree)
    }

    // built once, and again after the functions change
    pub(crate) fn library(&self) -> Rc<Scope> {
        let mut library = self.library.borrow_mut();
        library.get_or_insert_with(|| {
            debug!(functions = self.functions.iter().count(), "building library scope");
            let scope = Scope::new();
            scope.add(self.functions.iter().map(|(name, f)| (name, f.clone())));
            scope
        }).clone()
    }

    // builtins at the root, host bindings right above
    fn scope(&self, bindings: Option<&Bindings>) -> Rc<Scope> {
        let top = Scope::nested(&self.library());
        if let Some(bindings) = bindings {
            top.add(bindings.iter().map(|(k, v)| (k.as_str(), v.clone())));
        }
        top
    }

    pub fn evaluate(&self, text: &str) -> Result<Value> {
        self.evaluate_with(text, &Bindings::new())
    }

    /// The value of the last top level expression, `undefined` if none.
    pub fn evaluate_with(&self, text: &str, bindings: &Bindings) -> Result<Value> {
        let mut evaluated = self.evaluate_nodes(text, bindings)?;
        Ok(evaluated.pop().map_or(Value::Undefined, |e| e.result))
    }

    #[tracing::instrument(level = "debug", skip(self, bindings))]
    pub fn evaluate_nodes(&self, text: &str, bindings: &Bindings) -> Result<Vec<Evaluated>> {
        let start = Instant::now();
        let tree = self.tree(text)?;
        let evaluator = Evaluator::new(self.max_depth);
        let results = evaluator.evaluate(&tree, &self.scope(Some(bindings)))?;
        self.stats.borrow_mut().record(text, start.elapsed());
        Ok(tree.iter().cloned()
            .zip(results)
            .map(|(node, result)| Evaluated{node, result})
            .collect())
    }

    /// Calls a function value from the host with evaluated arguments.
    pub fn call_with(&self, f: &Value, args: Vec<Value>) -> Result<Value> {
        let evaluator = Evaluator::new(self.max_depth);
        let items = args.into_iter().map(Arg::Value).collect();
        eval::call_with(&evaluator, f, &self.scope(None), items, None)
    }

    pub fn stats(&self) -> Ref<'_, Stats> {
        self.stats.borrow()
    }

    pub fn top_expressions(&self, n: usize) -> Vec<(String, ExprStats)> {
        self.stats.borrow().top(n)
    }

    pub fn log_top_expressions(&self, n: usize) {
        for (expression, stats) in self.top_expressions(n) {
            info!(
                expression = %expression,
                calls = stats.calls,
                total_ms = stats.total.as_secs_f64() * 1000.0,
                average_ms = stats.average().as_secs_f64() * 1000.0,
                "top expression"
            );
        }
    }
}
