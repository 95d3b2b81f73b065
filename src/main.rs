use std::{
    env,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    process::ExitCode,
};

use huffman::{
    bits::{to_bit_string, to_packed},
    container::{self, Options},
    CodeTable, CompressionStats,
};

const USAGE: &str = "\
usage:
    huffman compress <input> <output>
    huffman decompress <input> <output>
    huffman show <text>";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args[..] {
        ["compress", input, output] => compress(input, output),
        ["decompress", input, output] => decompress(input, output),
        ["show", text] => show(text),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("huffman: {e}");
            ExitCode::FAILURE
        }
    }
}

fn compress(input: &str, output: &str) -> io::Result<()> {
    let data = fs::read(input)?;
    let mut out = BufWriter::new(File::create(output)?);
    let summary = container::write(&data, Options::default(), &mut out)?;
    out.flush()?;

    println!("{}", summary.stats);
    println!("{} -> {} bytes", data.len(), summary.bytes_written);
    Ok(())
}

fn decompress(input: &str, output: &str) -> io::Result<()> {
    let reader = BufReader::new(File::open(input)?);
    let data = container::read(reader)?;
    fs::write(output, &data)?;

    println!("{} bytes", data.len());
    Ok(())
}

/// Print the code table and encoding of `text`, one symbol per character.
fn show(text: &str) -> io::Result<()> {
    let data: Vec<char> = text.chars().collect();
    let encoded = huffman::encode(&data)?;
    let table = CodeTable::generate(&encoded.tree);

    print!("{}", encoded.tree);

    let mut codes: Vec<_> = table.iter().collect();
    codes.sort_by(|(a, x), (b, y)| x.len().cmp(&y.len()).then(a.cmp(b)));
    for (symbol, code) in codes {
        println!("{symbol:?}\t{}", to_bit_string(code));
    }

    println!("bits: {}", to_bit_string(&encoded.bits));
    println!("hex:  {}", hex::encode(to_packed(&encoded.bits)));
    println!("{}", CompressionStats::new(&encoded, 8));

    let decoded: String = huffman::decode(&encoded.bits, &encoded.tree)?
        .into_iter()
        .collect();
    println!("decoded: {decoded}");

    Ok(())
}
