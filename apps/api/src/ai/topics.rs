//! Fixed question bank used by the mock responder.

/// Topic keyword paired with its canned questions.
///
/// Order matters: lookup takes the first keyword found in the context, so
/// `node.js` precedes `node` and `javascript` precedes `java`.
pub const TOPIC_QUESTIONS: &[(&str, [&str; 3])] = &[
    (
        "react",
        [
            "What are React Hooks and why do we use them?",
            "Can you explain the difference between state and props?",
            "How does the virtual DOM work in React?",
        ],
    ),
    ("node.js", NODE_QUESTIONS),
    ("node", NODE_QUESTIONS),
    (
        "javascript",
        [
            "Explain the difference between let, const, and var.",
            "What is a closure in JavaScript?",
            "Can you explain promises and async/await?",
        ],
    ),
    (
        "java",
        [
            "What is the difference between an interface and an abstract class?",
            "Explain the concept of multithreading in Java.",
            "How does Garbage Collection work in Java?",
        ],
    ),
    (
        "python",
        [
            "What are decorators in Python and how do you use them?",
            "Can you explain the difference between lists and tuples?",
            "What is the Global Interpreter Lock (GIL) in Python?",
        ],
    ),
    (
        "sql",
        [
            "What is the difference between a LEFT JOIN and an INNER JOIN?",
            "Explain what indexing is in a database.",
            "How do you optimize a slow-running SQL query?",
        ],
    ),
    (
        "database",
        [
            "What is the difference between SQL and NoSQL?",
            "Explain what indexing is in a database.",
            "How do you define ACID properties?",
        ],
    ),
    (
        "aws",
        [
            "What is the difference between an EC2 instance and a serverless Lambda function?",
            "Can you explain what an S3 bucket is and how to secure it?",
            "How do you use IAM to control AWS resources?",
        ],
    ),
];

const NODE_QUESTIONS: [&str; 3] = [
    "How does the Event Loop work in Node.js?",
    "What is the purpose of middleware in Express.js?",
    "Explain how streams work in Node.js.",
];

/// Placeholder used when the prompt names neither a topic nor a role.
pub const UNKNOWN_TOPIC: &str = "your area of expertise";

/// Returns the question list of the first topic keyword contained in `context`.
/// `context` is expected to be lowercase already.
pub fn questions_for(context: &str) -> Option<&'static [&'static str; 3]> {
    TOPIC_QUESTIONS
        .iter()
        .find(|(keyword, _)| context.contains(keyword))
        .map(|(_, questions)| questions)
}

/// Generic question templates for a topic the bank does not cover.
pub fn generic_questions(topic: &str) -> [String; 5] {
    [
        format!("Can you explain a complex concept related to {topic}?"),
        format!("What are the best practices for working with {topic}?"),
        format!("Describe a challenging problem you solved using {topic}."),
        format!(
            "If you were designing a scalable architecture for a system involving {topic}, what key factors would you consider?"
        ),
        format!("Can you tell me about the most difficult bug you've had to fix in {topic}?"),
    ]
}
