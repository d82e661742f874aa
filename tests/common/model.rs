//! A tiny randomly initialised MarianMT checkpoint written to disk, so the
//! local engine can be exercised without downloading real weights.

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::marian::{self, MTModel};
use serde_json::{Value, json};
use std::path::Path;
use traducteur::config::LocalModelConfig;

pub const MAX_POSITION_EMBEDDINGS: usize = 32;

const WORDS: [&str; 13] = [
    "hello", "world", "the", "ai", "is", "transforming", "bonjour", "le", "monde", "l'ia",
    "transforme", "salut", "merci",
];

/// `</s>` is 0 and `<pad>` is the last id, as in the published Marian checkpoints.
fn vocab() -> Value {
    let mut vocab = serde_json::Map::new();
    vocab.insert("</s>".to_string(), json!(0));
    vocab.insert("<unk>".to_string(), json!(1));
    for (index, word) in WORDS.iter().enumerate() {
        vocab.insert(word.to_string(), json!(index + 2));
    }
    vocab.insert("<pad>".to_string(), json!(WORDS.len() + 2));
    Value::Object(vocab)
}

fn vocab_size() -> usize {
    WORDS.len() + 3
}

fn marian_config() -> Value {
    let pad = vocab_size() - 1;
    json!({
        "vocab_size": vocab_size(),
        "decoder_vocab_size": vocab_size(),
        "max_position_embeddings": MAX_POSITION_EMBEDDINGS,
        "encoder_layers": 1,
        "encoder_ffn_dim": 16,
        "encoder_attention_heads": 2,
        "decoder_layers": 1,
        "decoder_ffn_dim": 16,
        "decoder_attention_heads": 2,
        "use_cache": true,
        "is_encoder_decoder": true,
        "activation_function": "swish",
        "d_model": 8,
        "decoder_start_token_id": pad,
        "scale_embedding": true,
        "pad_token_id": pad,
        "eos_token_id": 0,
        "forced_eos_token_id": 0,
        "share_encoder_decoder_embeddings": true
    })
}

/// Word-level tokenizer in the `tokenizers` JSON format.
fn tokenizer() -> Value {
    json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": { "type": "Lowercase" },
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab(),
            "unk_token": "<unk>"
        }
    })
}

/// Writes config, weights and both tokenizers into `dir` and returns a
/// config that loads them without touching the network.
pub fn write_tiny_marian(dir: &Path) -> LocalModelConfig {
    let config_json = marian_config();
    std::fs::write(dir.join("config.json"), config_json.to_string()).unwrap();

    // Building the model through a VarMap creates every weight it asks for
    let config: marian::Config = serde_json::from_value(config_json).unwrap();
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    MTModel::new(&config, vb).unwrap();
    varmap.save(dir.join("model.safetensors")).unwrap();

    let tokenizer_json = tokenizer().to_string();
    std::fs::write(dir.join("source.json"), &tokenizer_json).unwrap();
    std::fs::write(dir.join("target.json"), &tokenizer_json).unwrap();

    LocalModelConfig {
        model_dir: dir.to_string_lossy().to_string(),
        hub_repo: None,
        tokenizer_repo: None,
        config_file: "config.json".to_string(),
        weights_file: "model.safetensors".to_string(),
        source_tokenizer: "source.json".to_string(),
        target_tokenizer: "target.json".to_string(),
        max_input_tokens: 512,
        max_new_tokens: 8,
        ..LocalModelConfig::default()
    }
}
