use crate::error::ConditionFault;
use crate::flow::Condition;
use crate::session::ResponseSet;

/// Recursive evaluator for if-else conditions.
///
/// Leniency policy: a rule whose response key was never answered, or whose
/// answer has the wrong shape for the comparison, is simply not met rather
/// than an error, so a traversal is never blocked by an upstream form
/// omission.
/// Only structural malformation (empty key, empty rule group) faults, and
/// that is a configuration defect the validator should have kept out of a
/// live flow.
pub(crate) struct ConditionEvaluator<'a> {
    responses: &'a ResponseSet,
}

impl<'a> ConditionEvaluator<'a> {
    pub(crate) fn new(responses: &'a ResponseSet) -> Self {
        Self { responses }
    }

    pub(crate) fn eval(&self, rule: &Condition) -> Result<bool, ConditionFault> {
        match rule {
            Condition::Answered { key } => {
                self.check_key(key)?;
                Ok(self.responses.contains(key))
            }
            Condition::Equals { key, value } => {
                self.check_key(key)?;
                Ok(self
                    .responses
                    .get(key)
                    .is_some_and(|answer| answer.matches(value)))
            }
            Condition::NotEquals { key, value } => {
                self.check_key(key)?;
                Ok(self
                    .responses
                    .get(key)
                    .is_some_and(|answer| !answer.matches(value)))
            }
            Condition::GreaterThan { key, value } => {
                self.check_key(key)?;
                Ok(self.responses.number(key).is_some_and(|n| n > *value))
            }
            Condition::LessThan { key, value } => {
                self.check_key(key)?;
                Ok(self.responses.number(key).is_some_and(|n| n < *value))
            }
            Condition::All { rules } => {
                if rules.is_empty() {
                    return Err(ConditionFault::EmptyGroup("all"));
                }
                for rule in rules {
                    if !self.eval(rule)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Any { rules } => {
                if rules.is_empty() {
                    return Err(ConditionFault::EmptyGroup("any"));
                }
                for rule in rules {
                    if self.eval(rule)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::Not { rule } => Ok(!self.eval(rule)?),
        }
    }

    fn check_key(&self, key: &str) -> Result<(), ConditionFault> {
        if key.is_empty() {
            Err(ConditionFault::EmptyKey)
        } else {
            Ok(())
        }
    }
}
