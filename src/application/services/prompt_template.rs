/// Prompt template with `{context}` and `{question}` placeholders.
///
/// Rendering is a pure string substitution, kept separate from model
/// invocation so the finished prompt can be inspected in tests. The
/// grounding instruction ("answer only from the context, say so when it
/// is missing") is a behavioral request to the model, not an enforced
/// guarantee.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

const DEFAULT_TEMPLATE: &str = "\
**You are an expert research assistant.** Answer the following question based *only* on the provided context from the research papers.
Provide a detailed, clear answer. If the answer is not present in the context, state that you cannot find the information in the provided documents.

**Context:**
{context}

**Question:**
{question}

**Answer:**
";

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn new(template: String) -> Self {
        Self { template }
    }

    pub fn render(&self, context: &str, question: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{question}", question)
    }
}
