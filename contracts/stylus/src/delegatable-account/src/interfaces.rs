//! Solidity ABI of the account and the contracts it calls.

use alloy_sol_types::sol;

sol! {
    interface IDelegatableAccount {
        function execute(address target, uint256 value, bytes data) external returns (bytes memory);
        function updateSigners(address[] newOwners, uint256 newThreshold, bytes authorization) external;
        function getOwners() external view returns (address[] memory owners);
        function threshold() external view returns (uint256 required);
    }

    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes signature) external view returns (bytes4 magicValue);
    }

    interface IEntryPoint {
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce);
    }
}
