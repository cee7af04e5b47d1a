
use compost_test_utils::prelude::*;
use sea_orm::TransactionTrait;

use super::*;
