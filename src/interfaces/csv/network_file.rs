use crate::domain::modes::ModeSet;
use crate::domain::network::{DebtEntry, Network, Party};
use crate::error::{Result, SettlementError};
use std::io::{Read, Write};
use tracing::{debug, warn};

const BANKS_HEADER: &str = "BANKS";
const TRANS_HEADER: &str = "TRANS";

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Preamble,
    Banks,
    Trans,
}

/// Reads a network from the sectioned `BANKS` / `TRANS` text layout.
///
/// ```text
/// BANKS
/// World_Bank|GooglePay,PayTM,Wire
/// HDFC|GooglePay,PayTM
/// TRANS
/// HDFC,World_Bank,200
/// ```
///
/// Bank lines are `name|comma-separated-modes`; transaction lines are
/// `debtor,creditor,amount` records read with the `csv` crate.
pub struct NetworkReader<R: Read> {
    source: R,
}

impl<R: Read> NetworkReader<R> {
    /// Creates a new `NetworkReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Parses the whole source.
    ///
    /// Blank lines, lines before the first section header, banks without a
    /// name and transactions with fewer than three fields or an empty bank
    /// are skipped. A bank without modes is kept so that validation can
    /// report it. An amount that is not a non-negative integer is an error.
    pub fn read(mut self) -> Result<Network> {
        let mut text = String::new();
        self.source.read_to_string(&mut text)?;

        let mut network = Network::default();
        let mut section = Section::Preamble;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            match line {
                BANKS_HEADER => section = Section::Banks,
                TRANS_HEADER => section = Section::Trans,
                _ => match section {
                    Section::Banks => network.parties.extend(parse_bank(line)),
                    Section::Trans => {
                        network.debts.extend(parse_debt(line, index as u64 + 1)?);
                    }
                    Section::Preamble => {}
                },
            }
        }

        debug!(
            banks = network.parties.len(),
            debts = network.debts.len(),
            "network parsed"
        );
        Ok(network)
    }
}

fn parse_bank(line: &str) -> Option<Party> {
    let mut parts = line.split('|');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return None;
    }
    let modes = ModeSet::parse(parts.next().unwrap_or_default());
    Some(Party::new(name, modes))
}

fn parse_debt(line: &str, line_no: u64) -> Result<Option<DebtEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(line.as_bytes());

    let Some(record) = reader.records().next().transpose()? else {
        return Ok(None);
    };
    if record.len() < 3 {
        warn!(line = line_no, "skipping transaction with fewer than 3 fields");
        return Ok(None);
    }

    let (debtor, creditor, amount) = (&record[0], &record[1], &record[2]);
    if debtor.is_empty() || creditor.is_empty() {
        warn!(line = line_no, "skipping transaction without debtor or creditor");
        return Ok(None);
    }

    let amount = amount
        .parse::<u32>()
        .map_err(|e| SettlementError::FormatError {
            line: line_no,
            message: format!("invalid amount '{amount}': {e}"),
        })?;
    Ok(Some(DebtEntry::new(debtor, creditor, amount)))
}

/// Writes a network in the layout understood by [`NetworkReader`].
pub struct NetworkWriter<W: Write> {
    sink: W,
}

impl<W: Write> NetworkWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_network(&mut self, network: &Network) -> Result<()> {
        writeln!(self.sink, "{BANKS_HEADER}")?;
        for party in &network.parties {
            writeln!(self.sink, "{}|{}", party.name, party.modes)?;
        }

        writeln!(self.sink, "{TRANS_HEADER}")?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut self.sink);
        for debt in &network.debts {
            writer.serialize(debt)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str) -> Result<Network> {
        NetworkReader::new(data.as_bytes()).read()
    }

    #[test]
    fn test_reader_valid_file() {
        let data = "BANKS\nWorld_Bank|GooglePay,PayTM,Wire\nHDFC| PayTM , GooglePay\nTRANS\nHDFC,World_Bank,200\n";
        let network = read(data).unwrap();

        assert_eq!(network.parties.len(), 2);
        assert_eq!(network.parties[1].name, "HDFC");
        assert_eq!(network.parties[1].modes.to_string(), "GooglePay,PayTM");
        assert_eq!(network.debts, vec![DebtEntry::new("HDFC", "World_Bank", 200)]);
    }

    #[test]
    fn test_reader_skips_noise() {
        let data = "\
# exported
BANKS

World_Bank|Wire
|Cash
A|Cash
TRANS
A,World_Bank
,World_Bank,5

 A , World_Bank , 40 , extra
";
        let network = read(data).unwrap();
        let names: Vec<&str> = network.parties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["World_Bank", "A"]);
        assert_eq!(network.debts, vec![DebtEntry::new("A", "World_Bank", 40)]);
    }

    #[test]
    fn test_reader_keeps_bank_without_modes() {
        let network = read("BANKS\nWorld_Bank|Wire\nLonely\nTRANS\n").unwrap();
        assert_eq!(network.parties.len(), 2);
        assert!(network.parties[1].modes.is_empty());
    }

    #[test]
    fn test_reader_malformed_amount() {
        let data = "BANKS\nWorld_Bank|Wire\nA|Cash\nTRANS\nA,World_Bank,lots\n";
        match read(data) {
            Err(SettlementError::FormatError { line, message }) => {
                assert_eq!(line, 5);
                assert!(message.contains("lots"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_reader_rejects_negative_amount() {
        let data = "BANKS\nWorld_Bank|Wire\nA|Cash\nTRANS\nA,World_Bank,-5\n";
        assert!(matches!(
            read(data),
            Err(SettlementError::FormatError { line: 5, .. })
        ));
    }

    #[test]
    fn test_sections_can_repeat() {
        let data = "TRANS\nA,B,1\nBANKS\nA|Cash\nTRANS\nB,A,2\nBANKS\nB|Cash\n";
        let network = read(data).unwrap();
        assert_eq!(network.parties.len(), 2);
        assert_eq!(network.debts.len(), 2);
    }

    #[test]
    fn test_written_file_reads_back() {
        let network = Network::new(
            vec![
                Party::new("World_Bank", ModeSet::parse("Wire,PayTM")),
                Party::new("Axis", ModeSet::parse("PayTM")),
            ],
            vec![DebtEntry::new("Axis", "World_Bank", 75)],
        );

        let mut buffer = Vec::new();
        NetworkWriter::new(&mut buffer).write_network(&network).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "BANKS\nWorld_Bank|PayTM,Wire\nAxis|PayTM\nTRANS\nAxis,World_Bank,75\n"
        );

        assert_eq!(read(&text).unwrap(), network);
    }
}
