//! Prompt templates. `{{key}}` placeholders are filled from the action state
//! by `compose_context`.

pub const MENTO_TEMPLATE: &str = r#"You extract Mento Protocol operations on the Celo network from a conversation and return them as JSON.

Recent conversation:

<recent_messages>
{{recentMessages}}
</recent_messages>

Supported chains:
<supported_chains>
{{supportedChains}}
</supported_chains>

Agent wallet:
<wallet_info>
{{walletInfo}}
</wallet_info>

Work out the following:

1. Operation: one of "quote", "approve", "swap".
2. Chain: "celo" or "alfajores".
3. Input token (the token being sold): a 0x address or a symbol such as CELO, cUSD, cEUR or cREAL.
4. Output token (the token being bought): same format as the input token.
5. Amount of the input token, as a plain number string such as "1.5".
6. Slippage tolerance in percent. Use 0.5 when the user does not give one.

Reason step by step inside <analysis> tags first. Quote the words that name the operation, chain, tokens, amount and slippage, and check each against the rules above. If something is missing or invalid, say so in the analysis.

Then answer with a single JSON markdown block of this shape:

```json
{
    "operation": "quote" | "approve" | "swap",
    "chain": "celo" | "alfajores",
    "fromToken": string,
    "toToken": string,
    "amount": string,
    "slippage": number
}
```

Rules:
- The chain must be exactly "celo" or "alfajores".
- The amount carries no token symbol.
- Slippage is a percentage: 0.5 means 0.5%.
"#;

pub const TRANSFER_TEMPLATE: &str = r#"You extract token transfer requests on the Celo network from a conversation and return them as JSON.

Recent conversation:

<recent_messages>
{{recentMessages}}
</recent_messages>

Supported chains:
<supported_chains>
{{supportedChains}}
</supported_chains>

Agent wallet:
<wallet_info>
{{walletInfo}}
</wallet_info>

Work out the following:

1. Chain to send from: "celo" or "alfajores".
2. Amount to send, as a plain number string such as "1.5".
3. Recipient: a Celo address (0x followed by 40 hex characters).
4. Token: a 0x address or a symbol such as cUSD. Leave it null for native CELO.

Reason step by step inside <analysis> tags first. Quote the words that name the chain, amount, recipient and token, and check each against the rules above.

Then answer with a single JSON markdown block of this shape:

```json
{
    "fromChain": "celo" | "alfajores",
    "amount": string,
    "toAddress": string,
    "token": string | null
}
```

Rules:
- The chain must be exactly "celo" or "alfajores".
- The amount carries no token symbol.
- Use null for "token" when the user sends native CELO.
"#;
