use super::*;

/// Collected fees moved to the fund account.
#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawEvent {
    /// Receiver of the fees.
    pub fund: AccountAddress,
    /// Withdrawn amount.
    pub amount: Amount,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum CustomEvent {
    Withdraw(WithdrawEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::Withdraw(event) => {
                out.write_u8(WITHDRAW_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            WITHDRAW_TAG => WithdrawEvent::deserial(source).map(CustomEvent::Withdraw),
            _ => Err(ParseError::default()),
        }
    }
}
