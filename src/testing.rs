use crate::record::RecordKind;
use crate::resolver::Resolve;
use std::cell::RefCell;
use std::collections::HashMap;
use trust_dns_proto::rr::RData;
use trust_dns_resolver::error::ResolveError;

// Answers queries from a fixed table and remembers every query it was asked. Names that are not
// in the table fail the way an NXDOMAIN would.
#[derive(Default)]
pub(crate) struct ScriptedResolver {
    answers: HashMap<(String, RecordKind), Option<Vec<RData>>>,
    asked: RefCell<Vec<(String, RecordKind)>>,
}

impl ScriptedResolver {
    pub(crate) fn answer(mut self, name: &str, kind: RecordKind, records: Vec<RData>) -> Self {
        self.answers.insert((name.to_string(), kind), Some(records));
        self
    }

    pub(crate) fn fail(mut self, name: &str, kind: RecordKind) -> Self {
        self.answers.insert((name.to_string(), kind), None);
        self
    }

    pub(crate) fn queries(&self) -> Vec<(String, RecordKind)> {
        self.asked.borrow().clone()
    }
}

impl Resolve for ScriptedResolver {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> std::result::Result<Vec<RData>, ResolveError> {
        self.asked.borrow_mut().push((name.to_string(), kind));
        match self.answers.get(&(name.to_string(), kind)) {
            Some(Some(records)) => Ok(records.clone()),
            _ => Err(ResolveError::from(format!(
                "The DNS query name does not exist: {}.",
                name
            ))),
        }
    }
}
