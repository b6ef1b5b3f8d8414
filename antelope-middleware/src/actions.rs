//! Helpers for the common contract actions: pushing an arbitrary action, token transfers,
//! account creation and contract deployment.
use crate::TransactGateway;
use antelope_core::{
    abi::AbiDef,
    failure::{ErrorKind, FailureInfo, GatewayResult},
    types::{
        system::{
            names, Authority, BuyRamBytes, DelegateBw, NewAccount, SetAbi, SetCode, Transfer,
        },
        Action, Asset, Bytes, Checksum256, Name, Pack, PermissionLevel, PublicKey,
        TransactionReceipt, TransactionRequest,
    },
};
use antelope_providers::Transport;
use antelope_signers::Signer;
use tracing::debug;

fn parse_name(name: &str) -> GatewayResult<Name> {
    Ok(name.parse::<Name>()?)
}

impl<T: Transport, S: Signer> TransactGateway<T, S> {
    /// Pushes a single action whose arguments are already packed. `authorization` lists
    /// `(actor, permission)` pairs.
    pub async fn push_action(
        &self,
        contract: &str,
        action: &str,
        data: impl Into<Bytes>,
        authorization: &[(&str, &str)],
    ) -> GatewayResult<TransactionReceipt> {
        let authorization = authorization
            .iter()
            .map(|(actor, permission)| -> GatewayResult<PermissionLevel> {
                Ok(PermissionLevel::new(parse_name(actor)?, parse_name(permission)?))
            })
            .collect::<GatewayResult<Vec<_>>>()?;
        let action = Action::new(parse_name(contract)?, parse_name(action)?, authorization, data);
        self.send_transaction(&TransactionRequest::new().action(action)).await
    }

    /// Transfers `quantity` from `from` to `to`, authorized by `from@permission`.
    ///
    /// The token contract defaults to the configured core token contract.
    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        quantity: Asset,
        memo: &str,
        token_contract: Option<&str>,
        permission: &str,
    ) -> GatewayResult<TransactionReceipt> {
        let contract = match token_contract {
            Some(contract) => parse_name(contract)?,
            None => self.config().main_token_contract,
        };
        let args = Transfer {
            from: parse_name(from)?,
            to: parse_name(to)?,
            quantity,
            memo: memo.to_owned(),
        };
        let auth = vec![PermissionLevel::new(args.from, parse_name(permission)?)];
        let action = Action::from_args(contract, names::TRANSFER, auth, &args);
        self.send_transaction(&TransactionRequest::new().action(action)).await
    }

    /// Creates the account `name` paid for by `creator`, in a single transaction.
    ///
    /// RAM is bought when `ram_bytes` is non zero. Bandwidth is staked, and transferred to the
    /// new account, when either stake is non zero; stakes are amounts of the core token.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_account(
        &self,
        creator: &str,
        name: &str,
        owner_key: PublicKey,
        active_key: PublicKey,
        ram_bytes: u32,
        stake_net: f64,
        stake_cpu: f64,
    ) -> GatewayResult<TransactionReceipt> {
        let system = self.config().system_contract;
        let creator = parse_name(creator)?;
        let name = parse_name(name)?;
        let auth = vec![PermissionLevel::new(creator, names::ACTIVE)];

        let mut req = TransactionRequest::new().action(Action::from_args(
            system,
            names::NEWACCOUNT,
            auth.clone(),
            &NewAccount {
                creator,
                name,
                owner: Authority::single_key(owner_key),
                active: Authority::single_key(active_key),
            },
        ));

        if ram_bytes > 0 {
            let args = BuyRamBytes { payer: creator, receiver: name, bytes: ram_bytes };
            req = req.action(Action::from_args(system, names::BUYRAMBYTES, auth.clone(), &args));
        }

        if stake_net != 0.0 || stake_cpu != 0.0 {
            let symbol = self.config().main_symbol().map_err(|err| {
                FailureInfo::from_error(ErrorKind::InvalidArgument, err)
            })?;
            let stake = |amount: f64| {
                Asset::from_decimal(amount, symbol)
                    .map_err(|err| FailureInfo::from_error(ErrorKind::InvalidArgument, err))
            };
            let args = DelegateBw {
                from: creator,
                receiver: name,
                stake_net_quantity: stake(stake_net)?,
                stake_cpu_quantity: stake(stake_cpu)?,
                transfer: true,
            };
            req = req.action(Action::from_args(system, names::DELEGATEBW, auth, &args));
        }

        self.send_transaction(&req).await
    }

    /// Deploys `code` and the JSON ABI `abi` to `account`.
    ///
    /// `setcode` is left out when the account already runs `code`, as the node refuses to set
    /// identical code, and `setabi` when the deployed ABI is the same. Returns `None` without
    /// submitting anything when both are unchanged.
    pub async fn deploy_contract(
        &self,
        account: &str,
        code: &[u8],
        abi: &str,
        vm_type: u8,
        vm_version: u8,
    ) -> GatewayResult<Option<TransactionReceipt>> {
        let system = self.config().system_contract;
        let abi = AbiDef::from_json(abi)?;
        let account_name = parse_name(account)?;
        let auth = vec![PermissionLevel::new(account_name, names::ACTIVE)];

        let deployed = self.query().get_code(account).await?;
        let mut req = TransactionRequest::new();
        if deployed.code_hash == Some(Checksum256::hash(code)) {
            debug!(%account_name, "code unchanged, skipping setcode");
        } else {
            let args = SetCode {
                account: account_name,
                vmtype: vm_type,
                vmversion: vm_version,
                code: code.to_vec().into(),
            };
            req = req.action(Action::from_args(system, names::SETCODE, auth.clone(), &args));
        }
        if deployed.abi_def().map_or(false, |deployed| deployed.same_as(&abi)) {
            debug!(%account_name, "abi unchanged, skipping setabi");
        } else {
            let args = SetAbi { account: account_name, abi: abi.packed().into() };
            req = req.action(Action::from_args(system, names::SETABI, auth, &args));
        }

        if req.actions.is_empty() {
            return Ok(None)
        }
        self.send_transaction(&req).await.map(Some)
    }
}
