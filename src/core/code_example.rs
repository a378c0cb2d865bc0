use crate::core::{Action, RewriteResult, RewriteStrategy};
use crate::utils::error::Result;
use crate::utils::text::{collapse_whitespace, truncate_chars};

const EXCERPT_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Array,
    Function,
    Object,
    Async,
}

impl Topic {
    /// 依優先序排列；第一個命中的主題勝出
    pub const PRIORITY: [Topic; 4] = [Topic::Array, Topic::Function, Topic::Object, Topic::Async];

    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Topic::Array => &["array", "list", "map"],
            Topic::Function => &["function", "method"],
            Topic::Object => &["object", "class"],
            Topic::Async => &["async", "promise", "await"],
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Topic::Array => ARRAY_TEMPLATE,
            Topic::Function => FUNCTION_TEMPLATE,
            Topic::Object => OBJECT_TEMPLATE,
            Topic::Async => ASYNC_TEMPLATE,
        }
    }

    pub fn detect(text: &str) -> Option<Topic> {
        let lower = text.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|topic| topic.markers().iter().any(|marker| lower.contains(marker)))
    }
}

pub const ARRAY_TEMPLATE: &str = r#"// Working with arrays
const numbers = [1, 2, 3, 4, 5];

// Iterate over every item
numbers.forEach((n) => console.log(n));

// Transform each item into a new array
const doubled = numbers.map((n) => n * 2);
console.log(doubled); // [2, 4, 6, 8, 10]

// Keep only the items that match
const evens = numbers.filter((n) => n % 2 === 0);
console.log(evens); // [2, 4]"#;

pub const FUNCTION_TEMPLATE: &str = r#"// Declaring a function
function greet(name) {
  return `Hello, ${name}!`;
}

// Arrow function shorthand
const add = (a, b) => a + b;

// Invoking them
console.log(greet("World")); // "Hello, World!"
console.log(add(2, 3)); // 5"#;

pub const OBJECT_TEMPLATE: &str = r#"// Creating an object literal
const user = {
  name: "Ada",
  role: "developer",
  describe() {
    return `${this.name} is a ${this.role}`;
  },
};

// Accessing properties
console.log(user.name); // "Ada"
console.log(user["role"]); // "developer"
console.log(user.describe());

// Constructing objects from a class
class Point {
  constructor(x, y) {
    this.x = x;
    this.y = y;
  }
}

const origin = new Point(0, 0);
console.log(origin.x, origin.y); // 0 0"#;

pub const ASYNC_TEMPLATE: &str = r#"// Async control flow with promises
function fetchUser(id) {
  return new Promise((resolve) => {
    setTimeout(() => resolve({ id, name: "Ada" }), 500);
  });
}

// Using async/await
async function showUser() {
  try {
    const user = await fetchUser(1);
    console.log(user.name);
  } catch (error) {
    console.error("Failed to load user:", error);
  }
}

showUser();"#;

fn placeholder_template(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let head = truncate_chars(&collapsed, EXCERPT_MAX_CHARS);
    let ellipsis = if head.len() < collapsed.len() { "..." } else { "" };
    let excerpt = head.trim_end();

    format!(
        "// Example based on: {}{}\nconst example = {{\n  concept: \"See documentation\",\n  implementation: \"Coming soon\"\n}};\n\nconsole.log(example);",
        excerpt, ellipsis
    )
}

pub struct CodeExampleStrategy;

impl RewriteStrategy for CodeExampleStrategy {
    fn action(&self) -> Action {
        Action::CodeExample
    }

    fn rewrite(&self, text: &str) -> Result<RewriteResult> {
        let body = match Topic::detect(text) {
            Some(topic) => {
                tracing::debug!("Code example topic: {:?}", topic);
                topic.template().to_string()
            }
            None => placeholder_template(text),
        };

        Ok(RewriteResult::new(Action::CodeExample, body))
    }
}
