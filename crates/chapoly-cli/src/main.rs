//! chapoly CLI
//!
//! ChaCha20-Poly1305 encryption of files and strings with detached nonce and tag.

mod config;

use chapoly_crypto::{
    CodecError, EncodedSealedOutput, Encoding, decrypt, decrypt_text, encrypt, encrypt_text,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use zeroize::Zeroizing;

use config::Config;

/// chapoly - ChaCha20-Poly1305 authenticated encryption
#[derive(Parser)]
#[command(name = "chapoly")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file into a sealed TOML document
    Encrypt {
        /// File to encrypt
        #[arg(required = true)]
        input: PathBuf,

        /// Sealed output file
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// Encoded 32-byte key
        #[arg(short, long, required = true)]
        key: String,

        /// Encoding of the key (hex or base64)
        #[arg(long)]
        key_encoding: Option<Encoding>,
    },

    /// Decrypt a sealed TOML document back into a file
    Decrypt {
        /// Sealed file to decrypt
        #[arg(required = true)]
        input: PathBuf,

        /// Plaintext output file
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// Encoded 32-byte key
        #[arg(short, long, required = true)]
        key: String,

        /// Encoding of the key (hex or base64)
        #[arg(long)]
        key_encoding: Option<Encoding>,
    },

    /// Encrypt a string, printing the encoded ciphertext, nonce and tag
    EncryptText {
        /// Text to encrypt
        #[arg(required = true)]
        text: String,

        /// Encoded 32-byte key
        #[arg(short, long, required = true)]
        key: String,

        /// Encoding of the key (hex or base64)
        #[arg(long)]
        key_encoding: Option<Encoding>,

        /// Encoding of the printed fields (hex or base64)
        #[arg(long)]
        output_encoding: Option<Encoding>,
    },

    /// Decrypt an encoded ciphertext back into a string
    DecryptText {
        /// Encoded ciphertext
        #[arg(required = true)]
        encrypted: String,

        /// Encoded 32-byte key
        #[arg(short, long, required = true)]
        key: String,

        /// Encoded 12-byte nonce
        #[arg(short, long, required = true)]
        nonce: String,

        /// Encoded 16-byte tag
        #[arg(short, long, required = true)]
        tag: String,

        /// Encoding of ciphertext, key, nonce and tag (hex or base64).
        /// Defaults to the configured output encoding, so text printed by
        /// `encrypt-text` decrypts without extra flags.
        #[arg(long)]
        input_encoding: Option<Encoding>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CodecError>() {
                Some(codec) => eprintln!("error [{}]: {codec}", codec.kind()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    config.validate()?;

    // Initialize logging
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encrypt {
            input,
            output,
            key,
            key_encoding,
        } => {
            let key = Zeroizing::new(key);
            let key_encoding = key_encoding.unwrap_or(config.encoding.key);
            encrypt_file(&input, &output, &key, key_encoding)?;
        }
        Commands::Decrypt {
            input,
            output,
            key,
            key_encoding,
        } => {
            let key = Zeroizing::new(key);
            let key_encoding = key_encoding.unwrap_or(config.encoding.key);
            decrypt_file(&input, &output, &key, key_encoding)?;
        }
        Commands::EncryptText {
            text,
            key,
            key_encoding,
            output_encoding,
        } => {
            let key = Zeroizing::new(key);
            let key_encoding = key_encoding.unwrap_or(config.encoding.key);
            let output_encoding = output_encoding.unwrap_or(config.encoding.output);

            tracing::debug!(
                bytes = text.len(),
                %key_encoding,
                %output_encoding,
                "encrypting text"
            );
            let sealed = encrypt_text(&text, &key, key_encoding, output_encoding)?;
            print!("{}", toml::to_string(&sealed)?);
        }
        Commands::DecryptText {
            encrypted,
            key,
            nonce,
            tag,
            input_encoding,
        } => {
            let key = Zeroizing::new(key);
            let input_encoding = input_encoding.unwrap_or(config.encoding.output);

            tracing::debug!(%input_encoding, "decrypting text");
            let plaintext = Zeroizing::new(decrypt_text(
                &encrypted,
                &key,
                &nonce,
                &tag,
                input_encoding,
            )?);
            println!("{}", plaintext.as_str());
        }
    }

    Ok(())
}

/// Encrypt `input` and write the sealed fields to `output` as hex TOML
fn encrypt_file(
    input: &Path,
    output: &Path,
    key: &str,
    key_encoding: Encoding,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }

    let key = Zeroizing::new(key_encoding.decode("key", key)?);
    let plaintext = Zeroizing::new(fs::read(input)?);

    tracing::info!(input = %input.display(), bytes = plaintext.len(), "encrypting file");
    let sealed = encrypt(&plaintext, &key)?;

    write_sealed(output, &sealed.encode(Encoding::Hex))?;
    tracing::info!(output = %output.display(), "wrote sealed file");

    println!("Encrypted {} -> {}", input.display(), output.display());
    Ok(())
}

/// Open a sealed TOML file and write the plaintext to `output`
fn decrypt_file(
    input: &Path,
    output: &Path,
    key: &str,
    key_encoding: Encoding,
) -> anyhow::Result<()> {
    let key = Zeroizing::new(key_encoding.decode("key", key)?);
    let sealed = read_sealed(input)?;

    let ciphertext = Encoding::Hex.decode("encrypted", &sealed.encrypted)?;
    let nonce = Encoding::Hex.decode("nonce", &sealed.nonce)?;
    let tag = Encoding::Hex.decode("tag", &sealed.tag)?;

    tracing::info!(input = %input.display(), bytes = ciphertext.len(), "decrypting file");
    let plaintext = Zeroizing::new(decrypt(&ciphertext, &key, &nonce, &tag)?);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, plaintext.as_slice())?;

    println!("Decrypted {} -> {}", input.display(), output.display());
    Ok(())
}

fn write_sealed(path: &Path, sealed: &EncodedSealedOutput) -> anyhow::Result<()> {
    let contents = toml::to_string(sealed)?;
    fs::write(path, contents)?;
    Ok(())
}

fn read_sealed(path: &Path) -> anyhow::Result<EncodedSealedOutput> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn test_cli_parses_encrypt_text() {
        let cli = Cli::try_parse_from([
            "chapoly",
            "encrypt-text",
            "hello",
            "--key",
            KEY_HEX,
            "--output-encoding",
            "base64",
        ])
        .unwrap();

        match cli.command {
            Commands::EncryptText {
                text,
                key_encoding,
                output_encoding,
                ..
            } => {
                assert_eq!(text, "hello");
                assert_eq!(key_encoding, None);
                assert_eq!(output_encoding, Some(Encoding::Base64));
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_decrypt_text_help_names_default() {
        use clap::CommandFactory;

        let mut cmd = Cli::command();
        let sub = cmd.find_subcommand_mut("decrypt-text").unwrap();
        let arg = sub
            .get_arguments()
            .find(|a| a.get_id() == "input_encoding")
            .unwrap();
        let help = arg.get_long_help().or(arg.get_help()).unwrap().to_string();
        assert!(help.contains("configured output encoding"));
    }

    #[test]
    fn test_cli_rejects_unknown_encoding() {
        let result = Cli::try_parse_from([
            "chapoly",
            "encrypt-text",
            "hello",
            "--key",
            KEY_HEX,
            "--key-encoding",
            "base32",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.bin");
        let sealed = dir.path().join("plain.sealed");
        let output = dir.path().join("out/plain.bin");

        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        fs::write(&input, &data).unwrap();

        encrypt_file(&input, &sealed, KEY_HEX, Encoding::Hex).unwrap();
        let doc = read_sealed(&sealed).unwrap();
        assert_eq!(doc.nonce.len(), 24);
        assert_eq!(doc.tag.len(), 32);
        assert_eq!(doc.encrypted.len(), data.len() * 2);

        decrypt_file(&sealed, &output, KEY_HEX, Encoding::Hex).unwrap();
        assert_eq!(fs::read(&output).unwrap(), data);
    }

    #[test]
    fn test_file_tampered_tag_reports_authentication_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.txt");
        let sealed = dir.path().join("plain.sealed");
        fs::write(&input, b"secret").unwrap();

        encrypt_file(&input, &sealed, KEY_HEX, Encoding::Hex).unwrap();
        let mut doc = read_sealed(&sealed).unwrap();
        let flipped = if doc.tag.starts_with('0') { "1" } else { "0" };
        doc.tag.replace_range(0..1, flipped);
        write_sealed(&sealed, &doc).unwrap();

        let err = decrypt_file(&sealed, &dir.path().join("out"), KEY_HEX, Encoding::Hex)
            .unwrap_err();
        let codec = err.downcast_ref::<CodecError>().unwrap();
        assert!(matches!(codec, CodecError::AuthenticationFailed));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = encrypt_file(
            &dir.path().join("missing"),
            &dir.path().join("out"),
            KEY_HEX,
            Encoding::Hex,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_short_key_is_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.txt");
        fs::write(&input, b"x").unwrap();

        let err = encrypt_file(&input, &dir.path().join("out"), "0011", Encoding::Hex).unwrap_err();
        let codec = err.downcast_ref::<CodecError>().unwrap();
        assert_eq!(codec.kind(), chapoly_crypto::ErrorKind::InvalidKeyLength);
    }
}
