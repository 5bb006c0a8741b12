use crate::application::ports::ChatPrompt;

pub const LEGAL_SYSTEM_TEMPLATE: &str = "\
You are a helpful legal assistant that explains legal concepts in simple, easy-to-understand language.
Use the following pieces of information to answer the human's questions:

1. Retrieved Context (relevant legal text):
```
{context}
```

2. Conversation History:
```
{chat_history}
```

Current Question: {input}

When answering:
1. Use the context and chat history to provide comprehensive answers
2. Maintain consistency with previous responses
3. If referring to previous discussion, be explicit about it
4. Avoid using complex legal jargon and explain any technical terms
5. If you don't know something based on the provided context, say so
";

pub fn render_legal_prompt(context: &str, chat_history: &str, question: &str) -> ChatPrompt {
    ChatPrompt {
        system: fill_template(
            LEGAL_SYSTEM_TEMPLATE,
            &[
                ("context", context),
                ("chat_history", chat_history),
                ("input", question),
            ],
        ),
        user: question.to_string(),
    }
}

/// Single pass, so placeholder-like text inside a value is left alone.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
